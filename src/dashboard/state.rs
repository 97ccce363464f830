//! Dashboard view state management

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Scan,
    Settings,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Scan => "Scan",
            DashboardView::Settings => "Settings",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Scan => "#",
            DashboardView::Settings => "S",
        }
    }
}

/// Action requested from the scan view, handled by the app after the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanCommand {
    /// Load the photo and queue it for recognition
    Scan,
    /// Solve the scanned puzzle (no solver is available)
    Solve,
}

/// Progress of the most recent scan
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanStatus {
    #[default]
    Idle,
    Scanning,
    Done {
        entries: usize,
        regions: usize,
        elapsed_ms: u64,
    },
    Failed(String),
}

/// State for the scan view
#[derive(Debug, Clone, Default)]
pub struct ScanViewState {
    /// Photo path being edited
    pub photo_path: String,
    /// Pending command from the UI
    pub command: Option<ScanCommand>,
}

/// Settings sections that can be expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    Recognition,
    Grid,
}

/// State for the settings view
#[derive(Debug, Clone)]
pub struct SettingsViewState {
    pub expanded_section: Option<SettingsSection>,
    /// Triggers an auto-save in the dashboard app
    pub has_unsaved_changes: bool,
}

impl Default for SettingsViewState {
    fn default() -> Self {
        Self {
            expanded_section: Some(SettingsSection::Recognition),
            has_unsaved_changes: false,
        }
    }
}

/// Complete dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub current_view: DashboardView,
    pub scan: ScanViewState,
    pub settings: SettingsViewState,
}

impl DashboardState {
    /// State pre-filled with a photo path
    pub fn with_photo(photo: Option<&std::path::Path>) -> Self {
        Self {
            scan: ScanViewState {
                photo_path: photo.map(|p| p.display().to_string()).unwrap_or_default(),
                command: None,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_view_is_scan() {
        let state = DashboardState::default();
        assert_eq!(state.current_view, DashboardView::Scan);
        assert_eq!(state.current_view.name(), "Scan");
        assert!(state.scan.command.is_none());
        assert!(!state.settings.has_unsaved_changes);
    }

    #[test]
    fn test_with_photo_prefills_path() {
        let state = DashboardState::with_photo(Some(Path::new("/photos/puzzle.png")));
        assert_eq!(state.scan.photo_path, "/photos/puzzle.png");

        let empty = DashboardState::with_photo(None);
        assert!(empty.scan.photo_path.is_empty());
    }
}
