use super::*;

#[test]
fn message_constructors_round_trip_through_chat_messages() {
    let messages = vec![
        system_message("be terse"),
        user_message("hi"),
        assistant_message("hello"),
    ];
    let chat = convert_messages_to_chat_messages(messages);
    assert_eq!(chat.len(), 3);
}

#[test]
fn completion_options_default_has_no_stream() {
    let options = CompletionOptions::default();
    assert!(!options.stream);
    assert!(options.tools.is_none());
}

#[tokio::test]
async fn completion_without_matching_provider_errors() {
    let router = DefaultRouter::new(crate::core::providers::ProviderRegistry::new());
    let result = router
        .completion("nonexistent/model", vec![user_message("hi")], None)
        .await;
    assert!(result.is_err());
}
