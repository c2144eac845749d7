use std::{collections::BTreeMap, fmt};

use derive_deref::{Deref, DerefMut};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::screen::{NavArgument, Screen, CHANNEL_ID};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([^{}/?&=]+)\}").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("missing mandatory parameter `{name}` for route `{route}`")]
    MissingParameter { route: String, name: String },
    #[error("parameter `{name}` is not declared by route `{route}`")]
    UnknownParameter { route: String, name: String },
    #[error("template `{template}` contains undeclared placeholder `{name}`")]
    UndeclaredPlaceholder { template: String, name: String },
    #[error("no destination matches `{0}`")]
    UnknownDestination(String),
    #[error("malformed path `{path}`: {reason}")]
    MalformedPath { path: String, reason: String },
}

/// Argument values keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Deref, DerefMut)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A concrete navigation target produced from a [`Screen`] and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedRoute {
    screen: Screen,
    path: String,
    args: RouteParams,
}

impl ResolvedRoute {
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn args(&self) -> &RouteParams {
        &self.args
    }

    /// Value of an argument, falling back to the declared default of optional ones.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.value(name)
    }

    pub fn channel_id(&self) -> Option<&str> {
        self.arg(CHANNEL_ID)
    }

    #[cfg(test)]
    pub(crate) fn without_args(screen: Screen, path: &str) -> Self {
        Self {
            screen,
            path: path.to_string(),
            args: RouteParams::new(),
        }
    }

    /// Resolves a concrete path (for example a deep link) against the screen registry.
    ///
    /// The returned route is rebuilt through [`build_route`], so optional
    /// arguments equal to their default are dropped from its path.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let malformed = |reason: &str| RouteError::MalformedPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let (location, query) = match path.split_once('?') {
            Some((location, query)) => (location, Some(query)),
            None => (path, None),
        };
        let location = location.trim_end_matches('/');

        let screen = Screen::ALL
            .into_iter()
            .filter(|screen| {
                location == screen.route()
                    || location
                        .strip_prefix(screen.route())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|screen| screen.route().len())
            .ok_or_else(|| {
                let head = location.split('/').next().unwrap_or_default();
                RouteError::UnknownDestination(head.to_string())
            })?;

        let rest = &location[screen.route().len()..];
        let segments: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest[1..].split('/').collect()
        };
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(malformed("empty path segment"));
        }

        let mandatory: Vec<&NavArgument> = screen
            .nav_arguments()
            .iter()
            .filter(|argument| argument.is_mandatory())
            .collect();
        if segments.len() > mandatory.len() {
            return Err(malformed("too many path segments"));
        }

        let mut params: RouteParams = mandatory
            .iter()
            .zip(segments)
            .map(|(argument, segment)| (argument.name, segment))
            .collect();

        for pair in query.into_iter().flat_map(|q| q.split('&')) {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| malformed("query pair without `=`"))?;
            let declared = screen
                .nav_arguments()
                .iter()
                .any(|argument| argument.name == name && !argument.is_mandatory());
            if !declared {
                return Err(malformed("unknown query parameter"));
            }
            params.insert(name.to_string(), value.to_string());
        }

        build_route(screen, &params)
    }
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Builds the concrete route of `screen` from the supplied argument values.
///
/// Mandatory arguments are substituted into their `{name}` placeholder.
/// Optional arguments that differ from their default are appended as a
/// `?name=value&...` suffix. Values are inserted verbatim; callers pass
/// path-safe values.
pub fn build_route(screen: Screen, params: &RouteParams) -> Result<ResolvedRoute, RouteError> {
    let key = screen.name();
    let template = key.split_once('?').map_or(key.as_str(), |(path, _)| path);
    let (path, args) = resolve_template(template, screen.nav_arguments(), params)?;
    Ok(ResolvedRoute { screen, path, args })
}

/// Placeholder names appearing in a route template, in order.
pub fn template_placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub(crate) fn resolve_template(
    template: &str,
    arguments: &[NavArgument],
    params: &RouteParams,
) -> Result<(String, RouteParams), RouteError> {
    for name in template_placeholders(template) {
        let declared = arguments
            .iter()
            .any(|argument| argument.is_mandatory() && argument.name == name);
        if !declared {
            return Err(RouteError::UndeclaredPlaceholder {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
    }

    if let Some(name) = params
        .keys()
        .find(|name| !arguments.iter().any(|argument| argument.name == name.as_str()))
    {
        return Err(RouteError::UnknownParameter {
            route: template.to_string(),
            name: name.clone(),
        });
    }

    // Validate everything before touching the template.
    if let Some(argument) = arguments.iter().find(|argument| {
        argument.is_mandatory() && params.value(argument.name).is_none_or(str::is_empty)
    }) {
        return Err(RouteError::MissingParameter {
            route: template.to_string(),
            name: argument.name.to_string(),
        });
    }

    let mut path = template.to_string();
    let mut resolved = RouteParams::new();
    for argument in arguments.iter().filter(|argument| argument.is_mandatory()) {
        let Some(value) = params.value(argument.name) else {
            continue;
        };
        let placeholder = argument.placeholder();
        if path.contains(&placeholder) {
            path = path.replace(&placeholder, value);
        } else {
            path.push('/');
            path.push_str(value);
        }
        resolved.insert(argument.name.to_string(), value.to_string());
    }

    let mut query = Vec::new();
    for argument in arguments.iter().filter(|argument| !argument.is_mandatory()) {
        let value = params.value(argument.name);
        match (value, argument.default_value) {
            (Some(value), default) if Some(value) != default => {
                query.push(format!("{}={}", argument.name, value));
                resolved.insert(argument.name.to_string(), value.to_string());
            }
            (_, Some(default)) => {
                resolved.insert(argument.name.to_string(), default.to_string());
            }
            (_, None) => {}
        }
    }
    if !query.is_empty() {
        path.push('?');
        path.push_str(&query.join("&"));
    }

    Ok((path, resolved))
}
