//! Status card component for scan statistics

use egui::{Color32, RichText, Rounding, Vec2};

use crate::dashboard::state::ScanStatus;
use crate::dashboard::theme::ThemeColors;

/// A small card with a title, a value and a colored status dot
pub struct StatusCard {
    pub title: String,
    pub value: String,
    pub status: CardStatus,
}

/// Status types for cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardStatus {
    Active,
    Inactive,
    Warning,
    Error,
}

impl CardStatus {
    pub fn color(&self) -> Color32 {
        match self {
            CardStatus::Active => ThemeColors::ACCENT_SUCCESS,
            CardStatus::Inactive => ThemeColors::TEXT_SECONDARY,
            CardStatus::Warning => ThemeColors::ACCENT_WARNING,
            CardStatus::Error => ThemeColors::ACCENT_ERROR,
        }
    }
}

impl From<&ScanStatus> for CardStatus {
    fn from(status: &ScanStatus) -> Self {
        match status {
            ScanStatus::Idle => CardStatus::Inactive,
            ScanStatus::Scanning => CardStatus::Warning,
            ScanStatus::Done { .. } => CardStatus::Active,
            ScanStatus::Failed(_) => CardStatus::Error,
        }
    }
}

impl StatusCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>, status: CardStatus) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            status,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(140.0);

                ui.horizontal(|ui| {
                    let dot = ui.cursor().left_top() + Vec2::new(6.0, 10.0);
                    ui.painter().circle_filled(dot, 4.0, self.status.color());
                    ui.add_space(16.0);

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.title)
                                .size(12.0)
                                .color(ThemeColors::TEXT_MUTED),
                        );
                        ui.add_space(2.0);
                        ui.label(
                            RichText::new(&self.value)
                                .size(18.0)
                                .color(ThemeColors::TEXT_PRIMARY)
                                .strong(),
                        );
                    });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_status_from_scan_status() {
        assert_eq!(CardStatus::from(&ScanStatus::Idle), CardStatus::Inactive);
        assert_eq!(CardStatus::from(&ScanStatus::Scanning), CardStatus::Warning);
        assert_eq!(CardStatus::from(&ScanStatus::Failed("boom".into())), CardStatus::Error);
        assert_eq!(
            CardStatus::from(&ScanStatus::Done {
                entries: 1,
                regions: 1,
                elapsed_ms: 0
            }),
            CardStatus::Active
        );
    }
}
