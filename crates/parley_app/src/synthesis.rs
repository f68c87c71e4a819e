use parley_domain::Context;
use serde::Serialize;

use crate::TemplateEngine;

pub const SYNTHESIS_TEMPLATE: &str = "parley-synthesis.md";

/// Context line used when the turn produced no tool output.
pub const NO_CONTEXT: &str = "No relevant information found";

/// Variables of the synthesis template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisPrompt {
    pub question: String,
    pub context: String,
}

impl SynthesisPrompt {
    pub fn from_context(context: &Context) -> Self {
        let question = context.first_user_message().unwrap_or_default().to_string();
        let evidence = context
            .tool_results()
            .map(|result| format!("- {}", result.content))
            .collect::<Vec<_>>();

        let context = if evidence.is_empty() {
            NO_CONTEXT.to_string()
        } else {
            evidence.join("\n")
        };

        Self { question, context }
    }

    pub fn render(&self, engine: &TemplateEngine) -> anyhow::Result<String> {
        engine.render(SYNTHESIS_TEMPLATE, self)
    }
}

#[cfg(test)]
mod tests {
    use parley_domain::{ContextMessage, ToolCallFull, ToolResult};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_evidence_lines_follow_result_order() {
        let fixture = Context::default()
            .add_message(ContextMessage::user("Find a paper"))
            .add_message(ContextMessage::assistant(
                "",
                vec![ToolCallFull::new("arxiv"), ToolCallFull::new("wikipedia")],
            ))
            .add_tool_results(vec![
                ToolResult::new("arxiv").success("Title: A"),
                ToolResult::new("wikipedia").failure(anyhow::anyhow!("timed out")),
            ]);

        let actual = SynthesisPrompt::from_context(&fixture);

        let expected = SynthesisPrompt {
            question: "Find a paper".to_string(),
            context: "- Title: A\n- Error: wikipedia lookup failed.\nCaused by: timed out"
                .to_string(),
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_sentinel_without_tool_results() {
        let fixture = Context::default().add_message(ContextMessage::user("Hello"));

        let actual = SynthesisPrompt::from_context(&fixture);

        assert_eq!(actual.context, NO_CONTEXT);
    }

    #[test]
    fn test_render_fills_question_and_context() {
        let fixture = SynthesisPrompt {
            question: "Which paper?".to_string(),
            context: "- Title: A".to_string(),
        };

        let actual = fixture.render(&TemplateEngine::new().unwrap()).unwrap();

        insta::assert_snapshot!(actual);
    }
}
