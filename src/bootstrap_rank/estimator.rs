use{
    crate::{misc_types::*, observations::*},
    rand::Rng,
    std::{
        collections::BTreeMap,
        fmt,
        num::*,
    },
    tracing::debug,
};

/// Deviation of a (week, regime) slice from a balanced design
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeIssue
{
    /// not every control of the vocabulary is present
    ControlCount{
        expected: usize,
        found: usize
    },
    /// controls contribute different numbers of runs
    UnequalRuns{
        runs: Vec<(String, usize)>
    },
}

impl fmt::Display for ShapeIssue{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self{
            Self::ControlCount{expected, found} => write!(
                f,
                "not the same number of controls in the data as expected: found {found}, expected {expected}"
            ),
            Self::UnequalRuns{runs} => {
                write!(f, "unbalanced design, runs per control:")?;
                for (control, n) in runs{
                    write!(f, " {control}={n}")?;
                }
                Ok(())
            }
        }
    }
}

/// Objective values of one (week, regime) slice, grouped by control.
/// Groups are ordered by label, values keep their input order.
#[derive(Clone, Debug, Default)]
pub struct ControlGroups<'a>
{
    groups: BTreeMap<&'a str, Vec<f64>>
}

impl<'a> ControlGroups<'a>{
    pub fn from_points<'b, I>(points: I) -> Self
    where I: IntoIterator<Item=&'b SlicePoint<'a>>,
        'a: 'b
    {
        let mut groups: BTreeMap<&'a str, Vec<f64>> = BTreeMap::new();
        for point in points{
            groups.entry(point.control)
                .or_default()
                .push(point.value);
        }
        Self{groups}
    }

    pub fn runs(&self, control: &str) -> usize
    {
        self.groups.get(control).map_or(0, Vec::len)
    }

    pub fn shape_issues(&self, expected_controls: usize) -> Vec<ShapeIssue>
    {
        let mut issues = Vec::new();
        if self.groups.len() != expected_controls{
            issues.push(
                ShapeIssue::ControlCount{
                    expected: expected_controls,
                    found: self.groups.len()
                }
            );
        }
        let mut sizes = self.groups.values().map(Vec::len);
        if let Some(first) = sizes.next(){
            if sizes.any(|n| n != first){
                let runs = self.groups
                    .iter()
                    .map(|(control, values)| (control.to_string(), values.len()))
                    .collect();
                issues.push(ShapeIssue::UnequalRuns{runs});
            }
        }
        issues
    }
}

/// Outcome of all bootstrap trials of one week
#[derive(Clone, Debug, PartialEq)]
pub struct WeekTally
{
    pub week: i64,
    /// number of won trials, in vocabulary order
    pub counts: Vec<(String, u64)>,
    pub issues: Vec<ShapeIssue>,
}

impl WeekTally{
    pub fn count(&self, control: &str) -> Option<u64>
    {
        self.counts
            .iter()
            .find(|(c, _)| c == control)
            .map(|(_, n)| *n)
    }

    pub fn total(&self) -> u64
    {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Control winning the most trials, first in vocabulary order on ties
    pub fn leader(&self) -> Option<(&str, u64)>
    {
        let mut best: Option<(&str, u64)> = None;
        for (control, n) in self.counts.iter(){
            if best.map_or(true, |(_, m)| *n > m){
                best = Some((control.as_str(), *n));
            }
        }
        best
    }
}

/// # Bootstrap estimate of how often each control is optimal
/// In every trial one run is drawn uniformly with replacement for each
/// control present, and every control attaining the minimum objective
/// value of the drawn runs is credited with a win. Ties credit all tied
/// controls, so the counts of a week sum to at least `n_boot`.
pub struct BootstrapRanker<'v>
{
    vocabulary: &'v ControlVocabulary,
    n_boot: NonZeroUsize,
}

impl<'v> BootstrapRanker<'v>{
    pub fn new(vocabulary: &'v ControlVocabulary, n_boot: NonZeroUsize) -> Self
    {
        Self{
            vocabulary,
            n_boot
        }
    }

    pub fn n_boot(&self) -> usize
    {
        self.n_boot.get()
    }

    /// Groups of controls outside the vocabulary take part in the trials,
    /// but their wins are not reported
    pub fn tally_groups<R>(&self, week: i64, groups: &ControlGroups, rng: &mut R) -> WeekTally
    where R: Rng
    {
        let issues = groups.shape_issues(self.vocabulary.len());

        let columns: Vec<(&str, &[f64])> = groups.groups
            .iter()
            .map(|(control, values)| (*control, values.as_slice()))
            .collect();
        let mut wins = vec![0_u64; columns.len()];
        let mut drawn = vec![0.0_f64; columns.len()];

        for _ in 0..self.n_boot.get(){
            for (slot, (_, values)) in drawn.iter_mut().zip(columns.iter()){
                *slot = values[rng.gen_range(0..values.len())];
            }
            let min = drawn.iter()
                .copied()
                .fold(f64::INFINITY, f64::min);
            for (win, &value) in wins.iter_mut().zip(drawn.iter()){
                if value == min {
                    *win += 1;
                }
            }
        }

        let counts = self.vocabulary
            .iter()
            .map(
                |control|
                {
                    let n = columns.iter()
                        .position(|(c, _)| *c == control)
                        .map_or(0, |i| wins[i]);
                    (control.to_owned(), n)
                }
            ).collect();

        WeekTally{
            week,
            counts,
            issues
        }
    }

    /// Tally every week of a (regime, objective) slice, weeks in order of first appearance.
    /// Points of controls outside the vocabulary are dropped first.
    pub fn tally_slice<R>(&self, points: &[SlicePoint], rng: &mut R) -> Vec<WeekTally>
    where R: Rng
    {
        let known: Vec<&SlicePoint> = points.iter()
            .filter(|p| self.vocabulary.contains(p.control))
            .collect();
        if known.len() < points.len(){
            debug!("ignoring {} points of unknown controls", points.len() - known.len());
        }
        weeks_in_order(known.iter().map(|p| p.week))
            .into_iter()
            .map(
                |week|
                {
                    let groups = ControlGroups::from_points(
                        known.iter().copied().filter(|p| p.week == week)
                    );
                    self.tally_groups(week, &groups, rng)
                }
            ).collect()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn vocab(labels: &[&str]) -> ControlVocabulary
    {
        ControlVocabulary::new(labels.iter().map(|l| l.to_string()).collect())
    }

    fn point(week: i64, control: &'static str, value: f64) -> SlicePoint<'static>
    {
        SlicePoint{week, control, value}
    }

    fn n_boot(n: usize) -> NonZeroUsize
    {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn strict_minimum_always_wins()
    {
        let vocabulary = vocab(&["A", "B", "C"]);
        let points = vec![
            point(1, "B", 5.0), point(1, "A", 1.0), point(1, "C", 9.0),
            point(1, "B", 6.0), point(1, "A", 2.0), point(1, "C", 7.0),
        ];
        let ranker = BootstrapRanker::new(&vocabulary, n_boot(1000));
        let mut rng = Pcg64::seed_from_u64(DEFAULT_RANDOM_SEED);
        let tallies = ranker.tally_slice(&points, &mut rng);

        assert_eq!(tallies.len(), 1);
        let tally = &tallies[0];
        assert!(tally.issues.is_empty());
        assert_eq!(tally.count("A"), Some(1000));
        assert_eq!(tally.count("B"), Some(0));
        assert_eq!(tally.count("C"), Some(0));
        assert_eq!(tally.leader(), Some(("A", 1000)));
    }

    #[test]
    fn ties_credit_every_tied_control()
    {
        let vocabulary = vocab(&["A", "B", "C"]);
        let points = vec![
            point(4, "A", 3.0), point(4, "B", 3.0), point(4, "C", 8.0),
            point(4, "A", 3.0), point(4, "B", 3.0), point(4, "C", 4.0),
        ];
        let ranker = BootstrapRanker::new(&vocabulary, n_boot(250));
        let mut rng = Pcg64::seed_from_u64(3);
        let tallies = ranker.tally_slice(&points, &mut rng);
        let tally = &tallies[0];

        assert_eq!(tally.count("A"), Some(250));
        assert_eq!(tally.count("B"), Some(250));
        assert_eq!(tally.count("C"), Some(0));
        assert_eq!(tally.total(), 500);
    }

    #[test]
    fn counts_sum_to_trials_without_ties()
    {
        let vocabulary = vocab(&["A", "B", "C"]);
        let points: Vec<_> = (0..20)
            .flat_map(
                |i|
                {
                    let i = i as f64;
                    vec![
                        point(1, "A", 100.0 + i * 3.0),
                        point(1, "B", 130.0 - i * 3.0 + 0.5),
                        point(1, "C", 115.0 + i * 0.1 + 0.25),
                    ]
                }
            ).collect();
        let ranker = BootstrapRanker::new(&vocabulary, n_boot(1000));
        let mut rng = Pcg64::seed_from_u64(100);
        let tallies = ranker.tally_slice(&points, &mut rng);
        let tally = &tallies[0];
        assert_eq!(tally.total(), 1000);
        // every control wins some of the time
        assert!(tally.counts.iter().all(|(_, n)| *n > 0));
    }

    #[test]
    fn same_seed_same_counts()
    {
        let vocabulary = vocab(&["A", "B", "C"]);
        let points: Vec<_> = (0..10)
            .flat_map(
                |i|
                {
                    let i = i as f64;
                    vec![
                        point(1, "A", (i * 7.3) % 5.0),
                        point(1, "B", (i * 3.1) % 5.0),
                        point(1, "C", (i * 1.7) % 5.0),
                        point(2, "A", (i * 2.9) % 4.0),
                        point(2, "B", (i * 5.3) % 4.0),
                        point(2, "C", (i * 0.7) % 4.0),
                    ]
                }
            ).collect();
        let ranker = BootstrapRanker::new(&vocabulary, n_boot(500));

        let first = ranker.tally_slice(&points, &mut Pcg64::seed_from_u64(42));
        let second = ranker.tally_slice(&points, &mut Pcg64::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn one_row_per_week_and_vocabulary_control()
    {
        let vocabulary = vocab(&["A", "B", "C", "D"]);
        let points = vec![
            point(2, "A", 1.0), point(2, "B", 2.0), point(2, "C", 3.0),
            point(1, "A", 1.0), point(1, "B", 2.0), point(1, "C", 3.0),
            point(3, "A", 1.0), point(3, "B", 2.0), point(3, "C", 3.0),
        ];
        let ranker = BootstrapRanker::new(&vocabulary, n_boot(10));
        let mut rng = Pcg64::seed_from_u64(1);
        let tallies = ranker.tally_slice(&points, &mut rng);

        let weeks: Vec<_> = tallies.iter().map(|t| t.week).collect();
        assert_eq!(weeks, vec![2, 1, 3]);
        for tally in tallies.iter(){
            assert_eq!(tally.counts.len(), 4);
            assert_eq!(tally.count("D"), Some(0));
            assert_eq!(
                tally.issues,
                vec![ShapeIssue::ControlCount{expected: 4, found: 3}]
            );
        }
    }

    #[test]
    fn unknown_controls_do_not_take_wins()
    {
        let vocabulary = vocab(&["A", "B"]);
        let points = vec![
            point(1, "A", 4.0), point(1, "B", 5.0), point(1, "X", 0.5),
            point(1, "A", 3.0), point(1, "B", 6.0), point(1, "X", 0.1),
        ];
        let ranker = BootstrapRanker::new(&vocabulary, n_boot(300));
        let mut rng = Pcg64::seed_from_u64(5);
        let tallies = ranker.tally_slice(&points, &mut rng);
        let tally = &tallies[0];

        assert!(tally.issues.is_empty());
        assert_eq!(tally.count("A"), Some(300));
        assert_eq!(tally.count("X"), None);
        assert_eq!(tally.total(), 300);
    }

    #[test]
    fn unbalanced_design_is_reported_not_fatal()
    {
        let vocabulary = vocab(&["A", "B"]);
        let points = vec![
            point(1, "A", 1.0), point(1, "A", 2.0),
            point(1, "B", 3.0),
        ];
        let groups = ControlGroups::from_points(points.iter());
        assert_eq!(groups.runs("A"), 2);
        assert_eq!(groups.runs("B"), 1);

        let ranker = BootstrapRanker::new(&vocabulary, n_boot(100));
        let mut rng = Pcg64::seed_from_u64(9);
        let tally = ranker.tally_groups(1, &groups, &mut rng);
        assert_eq!(
            tally.issues,
            vec![
                ShapeIssue::UnequalRuns{
                    runs: vec![("A".to_owned(), 2), ("B".to_owned(), 1)]
                }
            ]
        );
        assert_eq!(tally.count("A"), Some(100));
        assert!(tally.issues[0].to_string().contains("A=2 B=1"));
    }
}
