use std::time::Duration;

use parley_domain::{
    ChatCompletionMessage, ContextMessage, DisplayRecord, DisplayRole, FinishReason, Role,
    ToolCallFull, ToolCallId, TurnState,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::orch_setup::{MockTool, TestContext};
use crate::{FALLBACK_ANSWER, NO_CONTEXT, TurnReply};

fn tool_call(name: &str, id: &str, query: &str) -> ToolCallFull {
    ToolCallFull::new(name)
        .call_id(ToolCallId::new(id))
        .arguments(json!({"query": query}))
}

fn decision(calls: Vec<ToolCallFull>) -> Result<ChatCompletionMessage, String> {
    Ok(ChatCompletionMessage::assistant("")
        .tool_calls(calls)
        .finish_reason(FinishReason::ToolCalls))
}

fn answer(text: &str) -> Result<ChatCompletionMessage, String> {
    Ok(ChatCompletionMessage::assistant(text).finish_reason(FinishReason::Stop))
}

const ARXIV_PAPERS: &str = "Published: 2023-05-01\nTitle: Efficient Transformers A\nAuthors: A. Author\nSummary: Faster attention.\n\nPublished: 2023-09-12\nTitle: Efficient Transformers B\nAuthors: B. Author\nSummary: Sparse attention.";

#[tokio::test]
async fn test_direct_answer_without_tools() {
    let mut ctx = TestContext::init_turn("What is the capital of France?")
        .mock_assistant_responses(vec![answer(
            "<think>The user wants a capital.</think>\n\nThe capital of France is Paris.",
        )]);

    ctx.run().await;

    let actual = &ctx.output.replies;
    let expected = vec![TurnReply::Answer("\n\nThe capital of France is Paris.".to_string())];
    assert_eq!(actual, &expected);
    assert!(ctx.output.tool_calls.is_empty());
    assert_eq!(ctx.output.chat_requests.len(), 1);
    assert!(ctx.output.synthesis_prompts().is_empty());
}

#[tokio::test]
async fn test_deciding_request_offers_every_tool() {
    let mut ctx = TestContext::init_turn("Hi").mock_assistant_responses(vec![answer("Hello!")]);

    ctx.run().await;

    let actual: Vec<&str> = ctx.output.chat_requests[0]
        .tools
        .iter()
        .map(|tool| tool.name.as_str())
        .collect();
    let expected = vec!["arxiv", "tavily_search_results_json", "wikipedia"];
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_arxiv_lookup_is_synthesized() {
    let mut ctx = TestContext::init_turn("Find recent papers on transformer efficiency")
        .mock_tool("arxiv", MockTool::ok(ARXIV_PAPERS))
        .mock_assistant_responses(vec![
            decision(vec![tool_call("arxiv", "call_1", "transformer efficiency")]),
            answer("- Efficient Transformers A (2023, arXiv)\n- Efficient Transformers B (2023, arXiv)"),
        ]);

    ctx.run().await;

    let actual = ctx.output.replies[0].content();
    let expected = "- Efficient Transformers A (2023, arXiv)\n- Efficient Transformers B (2023, arXiv)";
    assert_eq!(actual, expected);

    let prompts = ctx.output.synthesis_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question: Find recent papers on transformer efficiency"));
    assert!(prompts[0].contains(&format!("Context: - {ARXIV_PAPERS}")));
}

#[tokio::test]
async fn test_tool_failure_is_still_synthesized() {
    let mut ctx = TestContext::init_turn("Latest news on fusion power")
        .mock_tool("tavily_search_results_json", MockTool::err("connection refused"))
        .mock_assistant_responses(vec![
            decision(vec![tool_call("tavily_search_results_json", "call_1", "fusion power news")]),
            answer("I could not retrieve current news on fusion power."),
        ]);

    ctx.run().await;

    let actual = &ctx.output.replies[0];
    let expected = TurnReply::Answer("I could not retrieve current news on fusion power.".to_string());
    assert_eq!(actual, &expected);

    let prompts = ctx.output.synthesis_prompts();
    assert!(prompts[0].contains(
        "Context: - Error: tavily_search_results_json lookup failed.\nCaused by: connection refused"
    ));
}

#[tokio::test]
async fn test_deciding_failure_records_fallback() {
    let mut ctx = TestContext::init_turn("What is the capital of France?")
        .mock_assistant_responses(vec![Err("503 Service Unavailable".to_string())]);

    ctx.run().await;

    let reply = &ctx.output.replies[0];
    assert!(reply.is_failed());
    assert_eq!(reply.content(), FALLBACK_ANSWER);
    let TurnReply::Failed { cause } = reply else { unreachable!() };
    assert!(cause.contains("503 Service Unavailable"));

    let actual = ctx.output.history.records().to_vec();
    let expected = vec![
        DisplayRecord { role: DisplayRole::User, content: "What is the capital of France?".into() },
        DisplayRecord { role: DisplayRole::Assistant, content: FALLBACK_ANSWER.into() },
    ];
    assert_eq!(actual, expected);
    assert!(ctx.output.tool_calls.is_empty());
}

#[tokio::test]
async fn test_synthesis_failure_records_fallback() {
    let mut ctx = TestContext::init_turn("Who wrote Dune?").mock_assistant_responses(vec![
        decision(vec![tool_call("wikipedia", "call_1", "Dune novel")]),
        Err("connection reset".to_string()),
    ]);

    ctx.run().await;

    assert_eq!(ctx.output.replies[0].content(), FALLBACK_ANSWER);
    assert_eq!(ctx.output.tool_calls.len(), 1);
    assert_eq!(ctx.output.history.len(), 2);
}

#[tokio::test]
async fn test_results_follow_request_order() {
    let mut ctx = TestContext::init_turn("Compare sources")
        .mock_tool(
            "arxiv",
            MockTool::ok("from arxiv").delay(Duration::from_millis(30)),
        )
        .mock_tool("wikipedia", MockTool::ok("from wikipedia"))
        .mock_tool("tavily_search_results_json", MockTool::ok("from the web"))
        .mock_assistant_responses(vec![
            decision(vec![
                tool_call("arxiv", "call_1", "a"),
                tool_call("wikipedia", "call_2", "b"),
                tool_call("tavily_search_results_json", "call_3", "c"),
            ]),
            answer("Summary."),
        ]);

    let turn = ctx.run_orchestrator().await.unwrap();

    let actual: Vec<(Option<&str>, &str)> = turn
        .context()
        .tool_results()
        .map(|result| {
            (
                result.call_id.as_ref().map(ToolCallId::as_str),
                result.content.as_str(),
            )
        })
        .collect();
    let expected = vec![
        (Some("call_1"), "from arxiv"),
        (Some("call_2"), "from wikipedia"),
        (Some("call_3"), "from the web"),
    ];
    assert_eq!(actual, expected);

    let roles: Vec<Role> = turn.context().messages.iter().map(ContextMessage::role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::Tool, Role::Tool, Role::Tool, Role::Assistant]
    );
    assert_eq!(turn.state(), &TurnState::Done { answer: Some(5) });
}

#[tokio::test]
async fn test_unknown_tool_becomes_error_result() {
    let mut ctx = TestContext::init_turn("Check the weather").mock_assistant_responses(vec![
        decision(vec![tool_call("weather", "call_1", "Paris")]),
        answer("I cannot check the weather."),
    ]);

    let turn = ctx.run_orchestrator().await.unwrap();

    let result = turn.context().tool_results().next().unwrap();
    assert!(result.is_error);
    assert_eq!(
        result.content,
        "Error: weather lookup failed.\nCaused by: Tool weather not found"
    );
    assert_eq!(turn.final_answer().unwrap(), "I cannot check the weather.");
}

#[tokio::test]
async fn test_tool_calls_in_synthesis_are_discarded() {
    let mut ctx = TestContext::init_turn("Who discovered penicillin?").mock_assistant_responses(vec![
        decision(vec![tool_call("wikipedia", "call_1", "penicillin")]),
        Ok(ChatCompletionMessage::assistant("Alexander Fleming discovered penicillin.")
            .tool_calls(vec![tool_call("wikipedia", "call_2", "Fleming")])),
    ]);

    let turn = ctx.run_orchestrator().await.unwrap();

    assert_eq!(
        turn.final_answer().unwrap(),
        "Alexander Fleming discovered penicillin."
    );
    assert_eq!(ctx.output.tool_calls.len(), 1);
    assert!(!turn.context().messages.last().unwrap().has_tool_call());
}

#[tokio::test]
async fn test_synthesis_is_deterministic_for_identical_inputs() {
    let setup = || {
        TestContext::init_turn("Find a 2023 paper")
            .mock_tool("arxiv", MockTool::ok(ARXIV_PAPERS))
            .mock_assistant_responses(vec![
                decision(vec![tool_call("arxiv", "call_1", "2023 paper")]),
                answer("- Efficient Transformers A (2023)"),
            ])
    };
    let mut first = setup();
    let mut second = setup();

    first.run().await;
    second.run().await;

    assert_eq!(first.output.synthesis_prompts(), second.output.synthesis_prompts());
    assert_eq!(first.output.replies, second.output.replies);
}

#[tokio::test]
async fn test_reasoning_is_stripped_from_synthesis() {
    let mut ctx = TestContext::init_turn("Explain quantum tunneling").mock_assistant_responses(vec![
        decision(vec![tool_call("wikipedia", "call_1", "quantum tunneling")]),
        answer("<think>draft</think>ignored<think>second</think>Particles cross barriers."),
    ]);

    ctx.run().await;

    assert_eq!(ctx.output.replies[0].content(), "Particles cross barriers.");
}

#[tokio::test]
async fn test_each_turn_adds_two_history_records() {
    let mut ctx = TestContext::init_turn("What is the capital of France?")
        .user_messages(vec![
            "What is the capital of France?".to_string(),
            "And of Italy?".to_string(),
        ])
        .mock_assistant_responses(vec![answer("Paris."), Err("timeout".to_string())]);

    ctx.run().await;

    let actual: Vec<(DisplayRole, &str)> = ctx
        .output
        .history
        .records()
        .iter()
        .map(|record| (record.role, record.content.as_str()))
        .collect();
    let expected = vec![
        (DisplayRole::User, "What is the capital of France?"),
        (DisplayRole::Assistant, "Paris."),
        (DisplayRole::User, "And of Italy?"),
        (DisplayRole::Assistant, FALLBACK_ANSWER),
    ];
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_turns_do_not_share_conversation_state() {
    let mut ctx = TestContext::init_turn("first")
        .user_messages(vec!["first".to_string(), "second".to_string()])
        .mock_assistant_responses(vec![answer("one"), answer("two")]);

    ctx.run().await;

    let actual: Vec<usize> = ctx
        .output
        .chat_requests
        .iter()
        .map(|context| context.messages.len())
        .collect();
    assert_eq!(actual, vec![1, 1]);
    assert_eq!(ctx.output.chat_requests[1].first_user_message(), Some("second"));
}

#[tokio::test]
async fn test_history_serializes_for_display() {
    let mut ctx = TestContext::init_turn("Hi").mock_assistant_responses(vec![answer("Hello!")]);

    ctx.run().await;

    let actual = serde_json::to_value(&ctx.output.history).unwrap();
    let expected = json!([
        {"role": "user", "content": "Hi"},
        {"role": "assistant", "content": "Hello!"}
    ]);
    assert_eq!(actual, expected);
}

#[test]
fn test_sentinel_context_constant() {
    assert_eq!(NO_CONTEXT, "No relevant information found");
}
