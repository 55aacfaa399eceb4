//! Property-based fuzzing tests for the Seasonlang scanner, parser and evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The scanner and parser never panic on arbitrary input
//! 2. Parsing and evaluation are deterministic
//! 3. Generated programs compute the values host arithmetic predicts

use proptest::prelude::*;
use seasonlang::{
    parse_source, run, Error, RunOptions, Scanner, ScopeError, Season, TokenKind, TypeError,
};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,500}").unwrap()
}

/// Generate token soup drawn from the language's own vocabulary
fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(source_token(), 0..60).prop_map(|tokens| tokens.join(" "))
}

fn source_token() -> impl Strategy<Value = String> {
    prop_oneof![
        // Punctuation
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("<<".to_string()),
        Just(">>".to_string()),
        Just(",".to_string()),
        Just(";".to_string()),
        // Keywords
        Just("var".to_string()),
        Just("print".to_string()),
        Just("if".to_string()),
        Just("else".to_string()),
        Just("for".to_string()),
        Just("to".to_string()),
        Just("fst".to_string()),
        Just("snd".to_string()),
        Just("seasonof".to_string()),
        // Operators
        Just("+".to_string()),
        Just("*".to_string()),
        Just("-".to_string()),
        Just("!".to_string()),
        Just("#".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just("&&".to_string()),
        // Literals
        (0i64..1000).prop_map(|n| n.to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        season_name(),
        // Identifiers
        identifier(),
        // Comments
        "//[^\n]{0,20}\n".prop_map(|s| s),
    ]
}

fn season_name() -> impl Strategy<Value = String> {
    prop::sample::select(Season::ALL.to_vec()).prop_map(|s| s.to_string())
}

/// Lowercase identifiers that are not reserved words
fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("reserved word", |s| TokenKind::keyword(s).is_none())
}

fn small_int() -> impl Strategy<Value = i64> {
    -1000i64..1000
}

fn execute(source: &str) -> Result<String, Error> {
    let mut output = Vec::new();
    run(source.as_bytes(), &mut output, &RunOptions::default())?;
    Ok(String::from_utf8(output).unwrap())
}

// =============================================================================
// SCANNER AND PARSER
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let _ = Scanner::new(&source).scan_tokens();
    }

    #[test]
    fn scanner_never_panics_on_unicode(source in "\\PC{0,200}") {
        let _ = Scanner::new(&source).scan_tokens();
    }

    #[test]
    fn scanner_ends_with_single_eof(source in token_soup()) {
        if let Ok(tokens) = Scanner::new(&source).scan_tokens() {
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eofs, 1);
        }
    }

    #[test]
    fn parser_never_panics(source in token_soup()) {
        let _ = parse_source(&source);
    }

    #[test]
    fn parsing_is_deterministic(source in token_soup()) {
        let first = format!("{:?}", parse_source(&source));
        let second = format!("{:?}", parse_source(&source));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn parser_handles_deep_nesting(depth in 1usize..100) {
        let source = format!("print {}1{}", "(".repeat(depth), ")".repeat(depth));
        prop_assert_eq!(execute(&source).unwrap(), "1\n");
    }

    #[test]
    fn full_pipeline_never_panics(source in token_soup()) {
        let _ = execute(&source);
        let mut output = Vec::new();
        let _ = run(source.as_bytes(), &mut output, &RunOptions { type_check: false });
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn arithmetic_matches_host(a in small_int(), b in small_int(), c in small_int()) {
        let source = format!("print {} + {} * {}", a, b, c);
        prop_assert_eq!(execute(&source).unwrap(), format!("{}\n", a + b * c));
    }

    #[test]
    fn int_ordering_matches_host(a in small_int(), b in small_int()) {
        let source = format!("print {} < {}; print {} == {}", a, b, a, b);
        prop_assert_eq!(execute(&source).unwrap(), format!("{}\n{}\n", a < b, a == b));
    }

    #[test]
    fn pair_ordering_is_conjunction(
        a in small_int(),
        b in small_int(),
        c in small_int(),
        d in small_int(),
    ) {
        let source = format!("print <<{}, {}>> < <<{}, {}>>", a, b, c, d);
        prop_assert_eq!(execute(&source).unwrap(), format!("{}\n", a < c && b < d));
    }

    #[test]
    fn season_ordinal_round_trips(season in prop::sample::select(Season::ALL.to_vec())) {
        let source = format!("print seasonof #{}; print #{}", season, season);
        prop_assert_eq!(
            execute(&source).unwrap(),
            format!("{}\n{}\n", season, season.ordinal())
        );
    }

    #[test]
    fn for_loop_iteration_count(start in -50i64..50, end in -50i64..50) {
        let source = format!(
            "var i = {}; var n = 0; for i to {} {{ n = n + 1 }}; print n; print i",
            start, end
        );
        let iterations = (end - start + 1).max(0);
        prop_assert_eq!(
            execute(&source).unwrap(),
            format!("{}\n{}\n", iterations, start + iterations)
        );
    }

    #[test]
    fn redeclaration_always_fails(name in identifier(), a in small_int(), b in small_int()) {
        let source = format!("var {} = {}; var {} = {}", name, a, name, b);
        let is_redeclaration = matches!(
            execute(&source),
            Err(Error::Static(TypeError::Scope(ScopeError::AlreadyDeclared(_))))
        );
        prop_assert!(is_redeclaration);
    }

    #[test]
    fn shadowing_never_leaks(name in identifier(), outer in small_int(), inner in small_int()) {
        let source = format!(
            "var {n} = {}; {{ var {n} = {}; print {n} }}; print {n}",
            outer,
            inner,
            n = name
        );
        prop_assert_eq!(execute(&source).unwrap(), format!("{}\n{}\n", inner, outer));
    }

    #[test]
    fn evaluation_is_deterministic(a in small_int(), b in small_int()) {
        let source = format!(
            "var x = <<{}, {}>>; if (fst x < snd x) {{ print x }} else {{ print snd x }}",
            a, b
        );
        prop_assert_eq!(execute(&source).unwrap(), execute(&source).unwrap());
    }
}

// =============================================================================
// REGRESSIONS
// =============================================================================

#[test]
fn regression_empty_input() {
    assert!(matches!(execute(""), Err(Error::Syntax(_))));
}

#[test]
fn regression_only_comments() {
    assert!(matches!(execute("// nothing here\n"), Err(Error::Syntax(_))));
}

#[test]
fn regression_very_long_number() {
    let source = format!("print {}", "9".repeat(40));
    assert!(matches!(execute(&source), Err(Error::Syntax(_))));
}

#[test]
fn regression_leading_zero() {
    // `007` is three numerals, which cannot follow one another
    assert!(matches!(execute("print 007"), Err(Error::Syntax(_))));
}
