use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    #[default]
    Home,
    AddFilms,
    FilmSearchResults,
    WatchedFilms,
    FilmDetails,
}

impl Page {
    /// Page the back action leads to
    pub fn back(self) -> Page {
        match self {
            Page::FilmSearchResults => Page::AddFilms,
            Page::FilmDetails => Page::WatchedFilms,
            _ => Page::Home,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Home => "home",
            Page::AddFilms => "addFilms",
            Page::FilmSearchResults => "filmSearchResults",
            Page::WatchedFilms => "watchedFilms",
            Page::FilmDetails => "filmDetails",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Alert,
    Confirm,
}

/// User-visible message; a confirm notice waits for confirm/cancel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Alert,
            message: message.into(),
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Confirm,
            message: message.into(),
        }
    }

    pub fn is_confirm(&self) -> bool {
        self.kind == NoticeKind::Confirm
    }
}
