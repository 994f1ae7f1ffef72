//! Resource kinds offered for every topic.

use serde::{Deserialize, Serialize};

/// Kind of learning resource attached to a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Video lesson (.mp4)
    #[default]
    Video,

    /// Printable tutorial notes (.pdf)
    Tutorial,

    /// Practice question set (.pdf)
    Questions,
}

impl ResourceKind {
    /// All kinds in tab order
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Video,
        ResourceKind::Tutorial,
        ResourceKind::Questions,
    ];

    /// Remote folder segment for this kind
    pub fn folder(self) -> &'static str {
        match self {
            ResourceKind::Video => "Videos",
            ResourceKind::Tutorial => "Tutes",
            ResourceKind::Questions => "Questions",
        }
    }

    /// File extension, including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Video => ".mp4",
            ResourceKind::Tutorial | ResourceKind::Questions => ".pdf",
        }
    }

    /// Whether the resource is an embedded document rather than a video
    pub fn is_document(self) -> bool {
        !matches!(self, ResourceKind::Video)
    }

    /// Card title shown on the resource tab
    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::Video => "Video Lesson",
            ResourceKind::Tutorial => "Tutorial",
            ResourceKind::Questions => "Practice Questions",
        }
    }

    /// One-line description shown under the tab title
    pub fn description(self) -> &'static str {
        match self {
            ResourceKind::Video => "Detailed video explanation",
            ResourceKind::Tutorial => "Printable tutorial (PDF)",
            ResourceKind::Questions => "Question set & exercises",
        }
    }

    /// Heading used by the inline viewer
    pub fn viewer_title(self) -> &'static str {
        match self {
            ResourceKind::Video => "Video Lesson",
            ResourceKind::Tutorial => "Tutorial Notes",
            ResourceKind::Questions => "Practice Quiz",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Video => write!(f, "video"),
            ResourceKind::Tutorial => write!(f, "tutorial"),
            ResourceKind::Questions => write!(f, "questions"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "video" | "videos" => Ok(ResourceKind::Video),
            "tutorial" | "tute" | "tutes" => Ok(ResourceKind::Tutorial),
            "questions" | "question" | "quiz" => Ok(ResourceKind::Questions),
            _ => anyhow::bail!("Unknown resource kind: {}", s),
        }
    }
}
