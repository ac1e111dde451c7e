//! Plain-text cards for `sentimo inspect` and `sentimo classify`.

use std::fmt::Write;

use sentimo_ai::{ArtifactPaths, Norm, PipelineSummary};
use sentimo_core::{CleanedText, Prediction};

/// Longest review excerpt echoed back in a prediction card.
const MAX_EXCERPT_CHARS: usize = 72;

/// Artifact summary grouped into vectorizer and classifier sections.
pub fn render_summary(paths: &ArtifactPaths, summary: &PipelineSummary) -> String {
    let mut out = String::new();
    let (min_n, max_n) = summary.ngram_range;

    let _ = writeln!(out, "=== Sentiment pipeline ===");
    let _ = writeln!(out);

    let _ = writeln!(out, "Vectorizer");
    row(&mut out, "path", &paths.vectorizer.display().to_string());
    row(&mut out, "vocabulary", &summary.vocabulary_size.to_string());
    row(&mut out, "ngram_range", &format!("{min_n}..={max_n}"));
    row(&mut out, "idf", yes_no(summary.use_idf));
    row(&mut out, "sublinear_tf", yes_no(summary.sublinear_tf));
    row(
        &mut out,
        "norm",
        match summary.norm {
            Some(Norm::L1) => "l1",
            Some(Norm::L2) => "l2",
            None => "none",
        },
    );
    if summary.stop_words > 0 {
        row(&mut out, "stop_words", &summary.stop_words.to_string());
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Classifier");
    row(&mut out, "path", &paths.model.display().to_string());
    row(&mut out, "classes", &summary.classes.join(", "));
    row(&mut out, "features", &summary.vocabulary_size.to_string());

    out
}

/// One classification result, with the cleaned text the model actually saw.
pub fn render_prediction(text: &str, cleaned: &CleanedText, prediction: &Prediction) -> String {
    let mut out = String::new();
    row(&mut out, "text", &excerpt(text));
    row(
        &mut out,
        "cleaned",
        if cleaned.is_empty() {
            "(empty)"
        } else {
            cleaned.as_str()
        },
    );
    row(&mut out, "sentiment", prediction.sentiment.as_str());
    row(
        &mut out,
        "confidence",
        &format!("{:.1}%", prediction.confidence * 100.0),
    );
    out
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<14} {value}");
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn excerpt(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= MAX_EXCERPT_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(MAX_EXCERPT_CHARS - 3).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentimo_core::{Sentiment, normalize};
    use std::path::PathBuf;

    fn summary() -> PipelineSummary {
        PipelineSummary {
            vocabulary_size: 18,
            ngram_range: (1, 2),
            use_idf: true,
            sublinear_tf: false,
            norm: Some(Norm::L2),
            stop_words: 0,
            classes: ["negative".into(), "positive".into()],
        }
    }

    #[test]
    fn summary_card_sections() {
        let paths = ArtifactPaths {
            model: PathBuf::from("m.json"),
            vectorizer: PathBuf::from("v.json"),
        };
        let card = render_summary(&paths, &summary());

        assert!(card.starts_with("=== Sentiment pipeline ==="));
        assert!(card.contains("Vectorizer\n"));
        assert!(card.contains("Classifier\n"));
        assert!(card.contains("  vocabulary     18\n"));
        assert!(card.contains("  ngram_range    1..=2\n"));
        assert!(card.contains("  classes        negative, positive\n"));
        assert!(!card.contains("stop_words"), "zero stop words are not listed");
    }

    #[test]
    fn prediction_card() {
        let text = "<b>GREAT movie!!!</b>";
        let card = render_prediction(
            text,
            &normalize(text),
            &Prediction {
                sentiment: Sentiment::Positive,
                confidence: 0.9234,
            },
        );
        assert!(card.contains("  cleaned        great movie\n"));
        assert!(card.contains("  sentiment      positive\n"));
        assert!(card.contains("  confidence     92.3%\n"));
    }

    #[test]
    fn empty_cleaned_text_marked() {
        let card = render_prediction(
            "!!!",
            &normalize("!!!"),
            &Prediction {
                sentiment: Sentiment::Negative,
                confidence: 0.5,
            },
        );
        assert!(card.contains("(empty)"));
    }

    #[test]
    fn long_text_truncated_to_one_line() {
        let text = format!("first line\n{}", "word ".repeat(40));
        let shown = excerpt(&text);
        assert!(!shown.contains('\n'));
        assert_eq!(shown.chars().count(), MAX_EXCERPT_CHARS);
        assert!(shown.ends_with("..."));
    }
}
