use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display-formatted recency string, not a machine-sortable timestamp
    pub time: String,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    /// Symbolic glyph name, opaque to this crate
    pub icon: String,
}
