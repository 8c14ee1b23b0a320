use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Bridged,
    Nat,
    #[serde(rename = "hostonly", alias = "hostOnly")]
    HostOnly,
    #[serde(other)]
    Unknown,
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bridged => write!(f, "bridged"),
            Self::Nat => write!(f, "nat"),
            Self::HostOnly => write!(f, "hostonly"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<NetworkType>,
    #[serde(default)]
    pub subnet: Option<String>,
    #[serde(default)]
    pub mask: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub dhcp: Option<bool>,
}

/// vmrest reports `dhcp` as the string `"true"`/`"false"`, other servers as a JSON bool.
fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    Ok(
        match Option::<BoolOrString>::deserialize(deserializer)? {
            Some(BoolOrString::Bool(value)) => Some(value),
            Some(BoolOrString::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            None => None,
        },
    )
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NetworkListResponse {
    Wrapped {
        #[serde(default)]
        vmnets: Vec<NetworkRecord>,
    },
    Bare(Vec<NetworkRecord>),
}

impl From<NetworkListResponse> for Vec<NetworkRecord> {
    fn from(value: NetworkListResponse) -> Self {
        match value {
            NetworkListResponse::Wrapped { vmnets } => vmnets,
            NetworkListResponse::Bare(vmnets) => vmnets,
        }
    }
}
