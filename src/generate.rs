//! Shared flow: diff -> bounded representation -> prompt -> generated line.

use tracing::{debug, warn};

use crate::diff::{Representation, select_representation, summarize};
use crate::error::GeneratorError;
use crate::llm::{GenerationRequest, TextGenerator, generate_with_retry};

/// Raw generator output together with the diff representation it saw.
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub representation: Representation,
}

/// Generate text for `diff` with a prompt built by `build_request`.
///
/// Empty diffs are rejected before any size management runs. If the
/// generator still reports the input as too large, the request is rebuilt
/// once from the diff summary.
pub async fn generate_for_diff<G, B>(
    generator: &G,
    diff: &str,
    build_request: B,
) -> Result<Generated, GeneratorError>
where
    G: TextGenerator + ?Sized,
    B: Fn(&Representation) -> GenerationRequest,
{
    if diff.trim().is_empty() {
        return Err(GeneratorError::EmptyDiff);
    }

    let representation = select_representation(diff);
    debug!(kind = representation.kind(), "Prompting with diff representation");

    match generate_with_retry(generator, &build_request(&representation)).await {
        Ok(text) => Ok(Generated {
            text,
            representation,
        }),
        Err(GeneratorError::InputTooLarge(message)) if !representation.is_summary() => {
            warn!(
                "Generator rejected {} diff as too large ({}), retrying with summary",
                representation.kind(),
                message
            );
            let summary = Representation::Summary(summarize(diff));
            let text = generate_with_retry(generator, &build_request(&summary)).await?;
            Ok(Generated {
                text,
                representation: summary,
            })
        }
        Err(e) => Err(e),
    }
}

/// Reduce generator output to a single clean line.
///
/// Skips blank lines and code fences, then strips matching quotes or
/// backticks wrapped around the first remaining line.
pub fn clean_output(raw: &str) -> String {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with("```"))
        .unwrap_or_default();

    strip_wrapping(line).to_string()
}

fn strip_wrapping(mut line: &str) -> &str {
    loop {
        let stripped = ['"', '\'', '`'].iter().find_map(|q| {
            line.strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        });
        match stripped {
            Some(inner) => line = inner.trim(),
            None => return line,
        }
    }
}
