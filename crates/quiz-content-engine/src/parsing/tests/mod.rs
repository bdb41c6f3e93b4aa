//! End-to-end tests for the segment → parse pipeline.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Block, BulletItem, Chunk, InlineRun, ParserState, parse_chunks, parse_document,
};

fn plain(text: &str) -> InlineRun {
    InlineRun::PlainText(text.to_string())
}

#[test]
fn heading_line() {
    assert_eq!(
        parse_document("# Hello").blocks,
        vec![Block::Heading {
            level: 1,
            text: "Hello".into()
        }]
    );
}

#[test]
fn two_item_bullet_list() {
    assert_eq!(
        parse_document("- Item one\n- Item two").blocks,
        vec![Block::BulletList {
            items: vec![
                BulletItem {
                    indent_level: 0,
                    runs: vec![plain("Item one")],
                },
                BulletItem {
                    indent_level: 0,
                    runs: vec![plain("Item two")],
                },
            ]
        }]
    );
}

#[test]
fn three_chunk_math_round_trip() {
    let chunks = [Chunk::text("$"), Chunk::text("x^2+1"), Chunk::text("$")];
    let (doc, state) = parse_chunks(&chunks, ParserState::default());

    assert_eq!(
        doc.blocks,
        vec![Block::MathBlock {
            latex: "x^2+1".into()
        }]
    );
    assert!(!state.pending_math_open());
    assert!(!state.pending_math_close());
}

#[test]
fn separated_delimiters_in_raw_input_reassemble() {
    assert_eq!(
        parse_document("Solve:~~~$~~~2x = 4~~~$~~~Done").blocks,
        vec![
            Block::Paragraph {
                runs: vec![plain("Solve")]
            },
            Block::MathBlock {
                latex: "2x = 4".into()
            },
            Block::Paragraph {
                runs: vec![plain("Done")]
            },
        ]
    );
}

#[test]
fn explanation_snapshot() {
    let doc = parse_document("## Working:~~~Revenue $R = 500$~~~- **Cost**: 300");
    insta::assert_debug_snapshot!(doc.blocks, @r#"
    [
        Heading {
            level: 2,
            text: "Working",
        },
        Paragraph {
            runs: [
                PlainText(
                    "Revenue",
                ),
            ],
        },
        MathBlock {
            latex: "R = 500",
        },
        BulletList {
            items: [
                BulletItem {
                    indent_level: 0,
                    runs: [
                        Bold(
                            "Cost",
                        ),
                        PlainText(
                            ": 300",
                        ),
                    ],
                },
            ],
        },
    ]
    "#);
}

#[rstest]
#[case("")]
#[case("# Hello")]
#[case("Intro:~~~- a\n  - b~~~$x$ and $y")]
#[case("$~~~dangling")]
#[case("**bold** ~~~ : ~~~ $ ~~~ \\newlineeq")]
fn reparsing_is_deterministic(#[case] raw: &str) {
    assert_eq!(parse_document(raw), parse_document(raw));
}

#[rstest]
#[case("$")]
#[case("$$$$")]
#[case("$~~~$~~~$")]
#[case("**")]
#[case("-")]
#[case("#")]
#[case(":")]
#[case("\\$\\$")]
fn degenerate_inputs_terminate(#[case] raw: &str) {
    let doc = parse_document(raw);
    assert!(doc.len() <= raw.len());
}

#[test]
fn fresh_documents_do_not_share_state() {
    // A dangling opener at the end of one document must not swallow the
    // start of the next.
    let first = parse_document("Intro~~~$");
    let second = parse_document("Plain answer");

    assert_eq!(first.len(), 1);
    assert_eq!(
        second.blocks,
        vec![Block::Paragraph {
            runs: vec![plain("Plain answer")]
        }]
    );
}
