use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const LIVESTREAM_CHANNEL_TYPE: &str = "livestream";
pub const STREAMER_CHANNEL_ID: &str = "streamer";

pub const EXTRA_STREAMER_AVATAR_LINK: &str = "EXTRA_STREAMER_AVATAR_LINK";
pub const EXTRA_STREAMER_NAME: &str = "EXTRA_STREAMER_NAME";
pub const EXTRA_STREAM_PREVIEW_LINK: &str = "EXTRA_STREAM_PREVIEW_LINK";
pub const EXTRA_STREAM_LINK: &str = "EXTRA_STREAM_LINK";
pub const EXTRA_DESCRIPTION: &str = "EXTRA_DESCRIPTION";
pub const EXTRA_TAGS: &str = "EXTRA_TAGS";
pub const EXTRA_POINTS_ICON: &str = "EXTRA_POINTS_ICON";
pub const EXTRA_POINTS_NAME: &str = "EXTRA_POINTS_NAME";

/// Livestream metadata carried in a channel's extra data.
///
/// The chat backend stores these as an untyped key/value map; they are read
/// once here and every other module works with the typed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelExtras {
    pub streamer_avatar_link: Option<String>,
    pub streamer_name: Option<String>,
    pub stream_preview_link: Option<String>,
    pub stream_link: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub points_icon: Option<String>,
    pub points_name: Option<String>,
}

impl ChannelExtras {
    /// Reads the known keys; values of an unexpected type are treated as absent.
    pub fn from_extra_data(extra_data: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            extra_data
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let tags = extra_data
            .get(EXTRA_TAGS)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            streamer_avatar_link: text(EXTRA_STREAMER_AVATAR_LINK),
            streamer_name: text(EXTRA_STREAMER_NAME),
            stream_preview_link: text(EXTRA_STREAM_PREVIEW_LINK),
            stream_link: text(EXTRA_STREAM_LINK),
            description: text(EXTRA_DESCRIPTION),
            tags,
            points_icon: text(EXTRA_POINTS_ICON),
            points_name: text(EXTRA_POINTS_NAME),
        }
    }

    pub fn to_extra_data(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let fields = [
            (EXTRA_STREAMER_AVATAR_LINK, &self.streamer_avatar_link),
            (EXTRA_STREAMER_NAME, &self.streamer_name),
            (EXTRA_STREAM_PREVIEW_LINK, &self.stream_preview_link),
            (EXTRA_STREAM_LINK, &self.stream_link),
            (EXTRA_DESCRIPTION, &self.description),
            (EXTRA_POINTS_ICON, &self.points_icon),
            (EXTRA_POINTS_NAME, &self.points_name),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        if !self.tags.is_empty() {
            map.insert(
                EXTRA_TAGS.to_string(),
                Value::Array(self.tags.iter().cloned().map(Value::String).collect()),
            );
        }
        map
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_type: String,
    pub id: String,
    pub name: String,
    pub member_ids: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub extras: ChannelExtras,
}

impl Channel {
    /// Channel id qualified with its type, e.g. `livestream:streamer`.
    pub fn cid(&self) -> String {
        format!("{}:{}", self.channel_type, self.id)
    }

    pub fn display_name(&self) -> &str {
        self.extras
            .streamer_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Channels created when the channel list comes back empty.
pub fn mock_channel_extras() -> Vec<ChannelExtras> {
    vec![
        ChannelExtras {
            streamer_avatar_link: Some(
                "https://user-images.githubusercontent.com/24237865/77314084-eb180600-6cfc-11ea-89d5-65b673f0a391.jpg"
                    .to_string(),
            ),
            streamer_name: Some("Spiderman".to_string()),
            stream_preview_link: Some(
                "https://github-production-user-asset-6210df.s3.amazonaws.com/24237865/283096747-5aaf1c56-cbc6-4db3-95e0-629f7e6bd951.png"
                    .to_string(),
            ),
            stream_link: Some(
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                    .to_string(),
            ),
            description: Some("Come to watch that I'm flying above the cities!".to_string()),
            tags: ["Flying", "Spiderman", "Marvel", "City Views", "Night Views"]
                .map(String::from)
                .to_vec(),
            points_icon: Some(
                "https://cdn.betterttv.net/emote/60ee7ce38ed8b373e4222366/1x".to_string(),
            ),
            points_name: Some("Spider".to_string()),
        },
        ChannelExtras {
            streamer_avatar_link: Some("https://placekitten.com/200/300".to_string()),
            streamer_name: Some("Big Buck".to_string()),
            stream_preview_link: Some(
                "https://upload.wikimedia.org/wikipedia/commons/thumb/c/c5/Big_buck_bunny_poster_big.jpg/1024px-Big_buck_bunny_poster_big.jpg"
                    .to_string(),
            ),
            stream_link: Some(
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/CastVideos/dash/ElephantsDreamVideo.mp4"
                    .to_string(),
            ),
            description: Some("Come watch an awesome cartoon with me!".to_string()),
            tags: ["Reality", "Live", "Korean", "K-pop", "Dancing"]
                .map(String::from)
                .to_vec(),
            points_icon: Some(
                "https://cdn.betterttv.net/emote/60ee7ce38ed8b373e4222366/1x".to_string(),
            ),
            points_name: Some("Buns".to_string()),
        },
    ]
}

/// Extras of the channel a broadcaster goes live on.
pub fn streamer_channel_extras() -> ChannelExtras {
    ChannelExtras {
        streamer_avatar_link: Some("https://placekitten.com/200/300".to_string()),
        streamer_name: Some("Streamer".to_string()),
        stream_preview_link: Some(
            "https://github-production-user-asset-6210df.s3.amazonaws.com/24237865/283672657-643e4e60-9082-4e75-8a16-e2a37086a2b9.png"
                .to_string(),
        ),
        stream_link: Some(
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4"
                .to_string(),
        ),
        description: Some("Come watch an awesome livestreaming!".to_string()),
        tags: ["Livestreaming", "Communication", "Talk", "Life", "Games"]
            .map(String::from)
            .to_vec(),
        points_icon: Some("https://cdn.betterttv.net/emote/60ee7ce38ed8b373e4222366/1x".to_string()),
        points_name: Some("Buns".to_string()),
    }
}
