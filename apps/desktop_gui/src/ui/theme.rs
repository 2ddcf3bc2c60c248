//! Palette for the assessment screen.

use client_core::ResultVariant;
use eframe::egui::Color32;

pub const PAGE_BACKGROUND: Color32 = Color32::from_rgb(249, 250, 251);
pub const CARD_BACKGROUND: Color32 = Color32::WHITE;
pub const CARD_BORDER: Color32 = Color32::from_rgb(229, 231, 235);
pub const TITLE: Color32 = Color32::from_rgb(29, 78, 216);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(75, 85, 99);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(239, 68, 68);
pub const BUTTON_FILL: Color32 = Color32::from_rgb(37, 99, 235);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultPalette {
    pub fill: Color32,
    pub border: Color32,
    pub text: Color32,
}

pub fn result_palette(variant: ResultVariant) -> ResultPalette {
    match variant {
        ResultVariant::Diabetic => ResultPalette {
            fill: Color32::from_rgb(254, 226, 226),
            border: Color32::from_rgb(248, 113, 113),
            text: Color32::from_rgb(185, 28, 28),
        },
        ResultVariant::Clear => ResultPalette {
            fill: Color32::from_rgb(220, 252, 231),
            border: Color32::from_rgb(74, 222, 128),
            text: Color32::from_rgb(22, 101, 52),
        },
    }
}
