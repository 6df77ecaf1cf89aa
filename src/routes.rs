//! Client-side route surface.
//!
//! `/` login, `/dashboard` test list, `/tests/create` new wizard,
//! `/tests/create/{id}?mode=edit|view` existing-test wizard.

use std::fmt;

/// How an existing test is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardMode {
    Create,
    #[default]
    Edit,
    View,
}

impl WizardMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::View)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    CreateTest,
    EditTest { id: String, mode: WizardMode },
    NotFound(String),
}

impl Route {
    pub fn parse(input: &str) -> Self {
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Login,
            ["dashboard"] => Route::Dashboard,
            ["tests", "create"] => Route::CreateTest,
            ["tests", "create", id] => match mode_from_query(query) {
                Some(mode) => Route::EditTest {
                    id: (*id).to_string(),
                    mode,
                },
                None => Route::NotFound(input.to_string()),
            },
            _ => Route::NotFound(input.to_string()),
        }
    }

    pub fn edit(id: impl Into<String>) -> Self {
        Route::EditTest {
            id: id.into(),
            mode: WizardMode::Edit,
        }
    }

    pub fn view(id: impl Into<String>) -> Self {
        Route::EditTest {
            id: id.into(),
            mode: WizardMode::View,
        }
    }
}

/// `None` for an unknown mode value.
fn mode_from_query(query: Option<&str>) -> Option<WizardMode> {
    let Some(query) = query else {
        return Some(WizardMode::Edit);
    };
    let mode = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "mode")
        .map(|(_, value)| value);
    match mode {
        None | Some("edit") => Some(WizardMode::Edit),
        Some("view") => Some(WizardMode::View),
        Some(_) => None,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/"),
            Route::Dashboard => f.write_str("/dashboard"),
            Route::CreateTest => f.write_str("/tests/create"),
            Route::EditTest { id, mode } => write!(f, "/tests/create/{}?mode={}", id, mode.as_str()),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}
