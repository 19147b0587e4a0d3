use serde_json::Value;

#[derive(Debug)]
pub enum AppEvent {
    Message(String),
    Error(String),
    Json(Value),
    Quit,
}

impl AppEvent {
    /// 控制台输出文本，Quit 没有输出
    pub fn render(&self) -> Option<String> {
        match self {
            AppEvent::Message(msg) => Some(msg.clone()),
            AppEvent::Error(msg) => Some(format!("error: {}", msg)),
            AppEvent::Json(value) => {
                Some(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
            }
            AppEvent::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_formats_each_event() {
        assert_eq!(
            AppEvent::Error("Advice not found".into()).render().as_deref(),
            Some("error: Advice not found")
        );
        assert_eq!(
            AppEvent::Json(json!({ "id": 1 })).render().as_deref(),
            Some("{\n  \"id\": 1\n}")
        );
        assert_eq!(AppEvent::Quit.render(), None);
    }
}
