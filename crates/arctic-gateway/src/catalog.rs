//! Static satellite status and recording list served alongside live telemetry.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SatelliteStatus {
    pub active: u32,
    pub status: &'static str,
    pub coverage: f64,
}

pub const SATELLITES: SatelliteStatus = SatelliteStatus {
    active: 47,
    status: "operational",
    coverage: 98.5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Archived,
}

impl RecordingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordingStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: &'static str,
    pub satellite: &'static str,
    pub title: &'static str,
    pub video_url: &'static str,
    pub thumbnail: &'static str,
    pub resolution: &'static str,
    pub duration: &'static str,
    pub status: RecordingStatus,
    pub created_at: String,
}

// (id, satellite, title, video, thumbnail, duration, minutes ago)
const RECORDINGS: [(&str, &str, &str, &str, &str, &str, i64); 4] = [
    (
        "1",
        "ARCTIC-1",
        "Спутниковое наблюдение - Оптический канал 1",
        "/videos/optic1.mp4",
        "https://images.unsplash.com/photo-1446776653964-20c1d3a81b06?w=300&h=200&fit=crop",
        "23:45",
        0,
    ),
    (
        "2",
        "POLAR-2",
        "Спутниковое наблюдение - Оптический канал 2",
        "/videos/optic2.mp4",
        "https://images.unsplash.com/photo-1446776877081-d282a0f896e2?w=300&h=200&fit=crop",
        "18:30",
        30,
    ),
    (
        "3",
        "CLIMATE-3",
        "Наблюдение с земли - Наземная станция",
        "/videos/earthrobot.mp4",
        "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=300&h=200&fit=crop",
        "15:22",
        60,
    ),
    (
        "4",
        "MONITOR-4",
        "Мониторинг океана - Плавучий буй",
        "/videos/waterdron.mp4",
        "https://images.unsplash.com/photo-1446776877081-d282a0f896e2?w=300&h=200&fit=crop",
        "21:15",
        90,
    ),
];

/// Mock archive with `createdAt` staggered back from `now`.
pub fn recordings(now: DateTime<Utc>) -> Vec<Recording> {
    RECORDINGS
        .iter()
        .map(|&(id, satellite, title, video_url, thumbnail, duration, ago)| Recording {
            id,
            satellite,
            title,
            video_url,
            thumbnail,
            resolution: "4K",
            duration,
            status: RecordingStatus::Archived,
            created_at: (now - Duration::minutes(ago)).to_rfc3339_opts(SecondsFormat::Millis, true),
        })
        .collect()
}
