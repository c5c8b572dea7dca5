// tests/extractor_test.rs — Integration test: extraction repair loop

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use projectchat::chat::extractor::Extractor;
use projectchat::infra::errors::ChatError;
use projectchat::provider::{ChatRequest, ChatResponse, Message, ModelProvider, TokenUsage};

struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    fn name(&self) -> &str {
        "Scripted Provider"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        self.requests.lock().unwrap().push(request);
        let content = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted");
        Ok(ChatResponse {
            content,
            usage: TokenUsage::default(),
        })
    }
}

const BROKEN_EXTRACTION: &str = r#"{
    "project": {
        "title": "",
        "budget": {"minimum": 20000, "total": 15000},
        "duration": {"total": 3, "type": "month"},
        "status": "created",
        "fundsStatus": "pending"
    },
    "talents": []
}"#;

const FIXED_EXTRACTION: &str = r#"{
    "project": {
        "title": "E-Learning Platform",
        "description": "Web based course platform",
        "budget": {"minimum": 5000, "total": 15000},
        "duration": {"total": 3, "type": "month"},
        "status": "created",
        "fundsStatus": "pending"
    },
    "talents": [{
        "name": "Backend Developer",
        "requirements": ["Rust"],
        "budget": 8000,
        "experience": "expert",
        "payment": "fixed",
        "status": "open"
    }]
}"#;

fn history() -> Vec<Message> {
    vec![
        Message::user("Saya ingin platform e-learning, budget 15000"),
        Message::assistant("Baik, role apa saja yang dibutuhkan?"),
        Message::user("Backend developer. #submit"),
    ]
}

#[tokio::test]
async fn test_repair_loop_recovers_from_invalid_payload() {
    let provider = ScriptedProvider::new(&[BROKEN_EXTRACTION, FIXED_EXTRACTION]);
    let extractor = Extractor::new(provider.clone(), "scripted-model".into(), 3, 0.2, 2048);

    let data = extractor.extract(&history()).await.unwrap();
    assert_eq!(data.project.title, "E-Learning Platform");
    assert_eq!(data.talents.len(), 1);

    // Second request carries the rejected output plus the repair instructions
    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    let repair = &requests[1];
    assert!(repair
        .messages
        .iter()
        .any(|m| m.content.contains("rejected")));
    assert!(repair
        .messages
        .iter()
        .any(|m| m.content.contains("project.title")));
}

#[tokio::test]
async fn test_exhausted_attempts_fail_with_issues() {
    let provider = ScriptedProvider::new(&[BROKEN_EXTRACTION, BROKEN_EXTRACTION]);
    let extractor = Extractor::new(provider, "scripted-model".into(), 2, 0.2, 2048);

    let err = extractor.extract(&history()).await.unwrap_err();
    match err {
        ChatError::ExtractionFailed { attempts, issues } => {
            assert_eq!(attempts, 2);
            assert!(issues.iter().any(|i| i.contains("project.title")));
            assert!(issues.iter().any(|i| i.contains("at least one talent")));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fenced_output_accepted_first_try() {
    let fenced = format!("```json\n{FIXED_EXTRACTION}\n```");
    let provider = ScriptedProvider::new(&[&fenced]);
    let extractor = Extractor::new(provider.clone(), "scripted-model".into(), 3, 0.2, 2048);

    let data = extractor.extract(&history()).await.unwrap();
    assert_eq!(data.project.slug, "e-learning-platform");
    assert_eq!(provider.requests.lock().unwrap().len(), 1);
}
