use divan::Bencher;
use lqd_bench::markup_fixtures;
use lqd_bench::MarkupFixture;
use lqd_syntax::parse_variable;
use lqd_syntax::ErrorMode;
use lqd_syntax::ParseContext;

fn main() {
    divan::main();
}

const MODES: &[ErrorMode] = &[ErrorMode::Lax, ErrorMode::Warn, ErrorMode::Strict];

#[divan::bench(args = markup_fixtures())]
fn parse_lax(bencher: Bencher, fixture: &MarkupFixture) {
    let context = ParseContext::lax();
    bencher.bench(|| parse_variable(divan::black_box(fixture.markup), &context));
}

#[divan::bench(args = markup_fixtures())]
fn parse_strict(bencher: Bencher, fixture: &MarkupFixture) {
    let context = ParseContext::strict();
    bencher.bench(|| parse_variable(divan::black_box(fixture.markup), &context));
}

#[divan::bench(args = MODES)]
fn parse_all_fixtures(bencher: Bencher, mode: &ErrorMode) {
    let context = ParseContext::new(*mode);
    let fixtures = markup_fixtures();
    bencher.bench(|| {
        for fixture in fixtures {
            divan::black_box(parse_variable(fixture.markup, &context).is_ok());
        }
    });
}

// Filters without keyword arguments never allocate a keyword map.
#[divan::bench(args = MODES)]
fn positional_only_filters(bencher: Bencher, mode: &ErrorMode) {
    let context = ParseContext::new(*mode);
    bencher.bench(|| parse_variable(divan::black_box("x | upcase | truncate: 10, '...'"), &context));
}

#[divan::bench(args = MODES)]
fn keyword_filters(bencher: Bencher, mode: &ErrorMode) {
    let context = ParseContext::new(*mode);
    bencher.bench(|| {
        parse_variable(
            divan::black_box("x | truncate: length: 10, omission: '...'"),
            &context,
        )
    });
}
