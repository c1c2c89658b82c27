//! Property-based tests for mdcanon.
//!
//! Generates structured Markdown documents and checks the canonicalizer's
//! core guarantees: it never panics, its output is a fixed point, ordered
//! lists renumber from 1, and block spacing stays exact.

use proptest::prelude::*;

use mdcanon_core::Options;
use mdcanon_render::process;

fn render(input: &str) -> String {
    process(input, &Options::default())
}

/// A run of plain words.
fn words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..8).prop_map(|w| w.join(" "))
}

/// An ATX heading of any level.
fn heading() -> impl Strategy<Value = String> {
    (1..=6usize, words()).prop_map(|(level, text)| format!("{} {}", "#".repeat(level), text))
}

/// An unordered list.
fn bullet_list() -> impl Strategy<Value = String> {
    prop::collection::vec(words(), 1..6).prop_map(|items| {
        items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// An ordered list with arbitrary source numbering.
fn ordered_list() -> impl Strategy<Value = String> {
    prop::collection::vec((1..1000u32, words()), 1..6).prop_map(|items| {
        items
            .iter()
            .map(|(n, item)| format!("{}. {}", n, item))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// A block quote.
fn quote() -> impl Strategy<Value = String> {
    words().prop_map(|text| format!("> {}", text))
}

/// A fenced code block.
fn code_block() -> impl Strategy<Value = String> {
    ("[a-z]{0,5}", prop::collection::vec("[a-z ]{0,20}", 0..5)).prop_map(|(lang, lines)| {
        format!("```{}\n{}\n```", lang, lines.join("\n"))
    })
}

/// A document of blank-line-separated blocks, without code blocks (code may
/// legitimately contain consecutive blank lines).
fn spaced_document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![words(), heading(), bullet_list(), ordered_list(), quote()],
        1..6,
    )
    .prop_map(|blocks| blocks.join("\n\n"))
}

/// A document that may also contain code blocks.
fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            words(),
            heading(),
            bullet_list(),
            ordered_list(),
            quote(),
            code_block()
        ],
        1..6,
    )
    .prop_map(|blocks| blocks.join("\n\n"))
}

proptest! {
    /// The canonicalizer must accept anything printable without panicking.
    #[test]
    fn render_never_panics(input in r"[\x20-\x7E\n\t]{0,400}") {
        let _ = render(&input);
    }

    /// Terminal styling must not panic either.
    #[test]
    fn terminal_render_never_panics(input in r"[\x20-\x7E\n\t]{0,200}") {
        let opts = Options { terminal: true };
        let _ = process(&input, &opts);
    }

    /// Canonical output is a fixed point of the pipeline.
    #[test]
    fn canonical_form_is_idempotent(doc in document()) {
        let once = render(&doc);
        let twice = render(&once);
        prop_assert_eq!(once, twice);
    }

    /// Ordered lists renumber from 1 regardless of source numbering.
    #[test]
    fn ordered_lists_renumber(list in ordered_list()) {
        let out = render(&list);
        for (index, line) in out.lines().enumerate() {
            let marker = format!("{}.\t", index + 1);
            prop_assert!(
                line.starts_with(&marker),
                "line {:?} does not start with {:?}",
                line,
                marker
            );
        }
    }

    /// Exactly one blank line between blocks; none leading or trailing.
    #[test]
    fn blank_line_discipline(doc in spaced_document()) {
        let out = render(&doc);
        prop_assert!(!out.starts_with('\n'));
        prop_assert!(!out.contains("\n\n\n"));
        prop_assert!(!out.ends_with("\n\n"));
    }

    /// Plain word paragraphs survive untouched apart from the final newline.
    #[test]
    fn plain_paragraphs_are_stable(text in words()) {
        prop_assert_eq!(render(&text), format!("{}\n", text));
    }
}
