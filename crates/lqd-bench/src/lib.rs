use std::fmt;
use std::sync::OnceLock;

#[derive(Clone)]
pub struct MarkupFixture {
    pub label: &'static str,
    pub markup: &'static str,
}

impl fmt::Display for MarkupFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Output-tag markup samples, one `label<TAB>markup` pair per line.
pub fn markup_fixtures() -> &'static [MarkupFixture] {
    static FIXTURES: OnceLock<Vec<MarkupFixture>> = OnceLock::new();
    FIXTURES.get_or_init(load_markup_fixtures).as_slice()
}

fn load_markup_fixtures() -> Vec<MarkupFixture> {
    let fixtures = include_str!("../fixtures/markup.tsv")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (label, markup) = line
                .split_once('\t')
                .unwrap_or_else(|| panic!("fixture line without a tab: {line:?}"));
            MarkupFixture { label, markup }
        })
        .collect::<Vec<_>>();

    assert!(!fixtures.is_empty(), "no markup fixtures");

    fixtures
}
