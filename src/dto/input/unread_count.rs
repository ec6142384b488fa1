use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UnreadCount {
    #[serde(rename = "unreadCount")]
    pub unread_count: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unread_count_json_deserialize_ok() {
        let json = r#"{ "unreadCount": 5 }"#;

        let unread_count = serde_json::from_str::<UnreadCount>(json).unwrap();

        assert_eq!(unread_count.unread_count, 5);
    }
}
