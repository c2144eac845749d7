use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::domain::{
    route::{build_route, ResolvedRoute, RouteError, RouteParams},
    transition::TransitionPolicy,
};

/// Name of the channel argument shared by every channel-scoped screen.
pub const CHANNEL_ID: &str = "channelId";

/// Value type of a navigation argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavType {
    String,
}

/// Declaration of a single argument accepted by a [`Screen`].
///
/// An argument without a default value is mandatory and becomes a path
/// segment of the route key; one with a default is optional and goes into the
/// query suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavArgument {
    pub name: &'static str,
    pub ty: NavType,
    pub default_value: Option<&'static str>,
}

impl NavArgument {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            ty: NavType::String,
            default_value: None,
        }
    }

    pub const fn optional_string(name: &'static str, default_value: &'static str) -> Self {
        Self {
            name,
            ty: NavType::String,
            default_value: Some(default_value),
        }
    }

    pub fn is_mandatory(&self) -> bool {
        self.default_value.is_none()
    }

    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

const CHANNEL_ARGUMENTS: &[NavArgument] = &[NavArgument::string(CHANNEL_ID)];

/// The closed set of destinations the app can navigate to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Screen {
    /// Home screen listing live channels.
    #[strum(serialize = "channels")]
    Channels,
    #[strum(serialize = "messages")]
    Messages,
    #[strum(serialize = "livestream_watcher")]
    LivestreamWatcher,
    #[strum(serialize = "livestream_host")]
    LivestreamStreamer,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Channels,
        Screen::Messages,
        Screen::LivestreamWatcher,
        Screen::LivestreamStreamer,
    ];

    /// Stable identifier of the destination.
    pub fn id(self) -> &'static str {
        self.route()
    }

    /// Path template without the derived argument segments.
    pub fn route(self) -> &'static str {
        match self {
            Screen::Channels => "channels",
            Screen::Messages => "messages",
            Screen::LivestreamWatcher => "livestream_watcher",
            Screen::LivestreamStreamer => "livestream_host",
        }
    }

    pub fn nav_arguments(self) -> &'static [NavArgument] {
        match self {
            Screen::Channels => &[],
            Screen::Messages | Screen::LivestreamWatcher | Screen::LivestreamStreamer => {
                CHANNEL_ARGUMENTS
            }
        }
    }

    /// Route key registered with the navigation engine, e.g. `messages/{channelId}`.
    pub fn name(self) -> String {
        append_arguments(self.route(), self.nav_arguments())
    }

    pub fn transition(self) -> Option<TransitionPolicy> {
        match self {
            Screen::Channels => None,
            Screen::Messages | Screen::LivestreamWatcher | Screen::LivestreamStreamer => {
                Some(TransitionPolicy::slide())
            }
        }
    }

    /// Looks a destination up by its identifier.
    pub fn from_id(id: &str) -> Option<Screen> {
        Screen::iter().find(|screen| screen.id() == id)
    }

    /// Builds the route of a channel-scoped screen.
    ///
    /// Fails for [`Screen::Channels`], which takes no channel.
    pub fn create_route(self, channel_id: &str) -> Result<ResolvedRoute, RouteError> {
        let params = RouteParams::new().with(CHANNEL_ID, channel_id);
        build_route(self, &params)
    }
}

pub(crate) fn append_arguments(route: &str, arguments: &[NavArgument]) -> String {
    let mandatory = arguments
        .iter()
        .filter(|argument| argument.is_mandatory())
        .map(NavArgument::placeholder)
        .collect::<Vec<_>>();
    let optional = arguments
        .iter()
        .filter(|argument| !argument.is_mandatory())
        .map(|argument| format!("{}={}", argument.name, argument.placeholder()))
        .collect::<Vec<_>>();

    let mut name = route.to_string();
    if !mandatory.is_empty() {
        name.push('/');
        name.push_str(&mandatory.join("/"));
    }
    if !optional.is_empty() {
        name.push('?');
        name.push_str(&optional.join("&"));
    }
    name
}
