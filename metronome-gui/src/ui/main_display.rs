//! # Main Display Module
//!
//! Layout of the single metronome window: BPM field and time signature
//! selector on top, the beat counter and measure indicator in the middle,
//! Start and Stop at the bottom.

use iced::widget::{button, column, container, horizontal_space, row, text, text_input};
use iced::{Alignment, Element, Length};
use metronome_core::MetronomeState;

use super::measure_indicator::MeasureIndicator;
use crate::{Message, PanelState};

/// Creates the complete main application view
pub fn create_main_view<'a>(panel: &'a PanelState, state: &MetronomeState) -> Element<'a, Message> {
    let bpm_input = row![
        text("BPM:").size(14),
        text_input("60", &panel.bpm_text)
            .on_input(Message::BpmEdited)
            .on_submit(Message::Start)
            .width(Length::Fixed(64.0)),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let signature_selector = row![
        text("Time:").size(14),
        button(text("<").size(14))
            .padding([2, 8])
            .on_press(Message::PreviousSignature),
        text(panel.time_signature.to_string())
            .size(16)
            .width(Length::Fixed(36.0))
            .center(),
        button(text(">").size(14))
            .padding([2, 8])
            .on_press(Message::NextSignature),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let inputs = row![bpm_input, horizontal_space(), signature_selector].align_y(Alignment::Center);

    let counter = text(panel.beat.to_string()).size(34);

    let indicator = MeasureIndicator::new(
        panel.time_signature.beats_per_measure(),
        panel.beat,
        state.running,
    )
    .view();

    let controls = row![
        make_control_button("Start", Message::Start, state.running),
        horizontal_space(),
        make_control_button("Stop", Message::Stop, false),
    ];

    let main_content = column![inputs, counter, indicator, controls]
        .spacing(12)
        .align_x(Alignment::Center)
        .padding(15);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Start/Stop button. `active` paints it to show the metronome is running.
fn make_control_button(label: &'static str, message: Message, active: bool) -> Element<'static, Message> {
    let mut button = button(text(label).size(12).center().width(Length::Fill))
        .width(Length::Fixed(96.0))
        .padding([12, 20])
        .on_press(message);

    if active {
        button = button.style(|_theme, _status| {
            use iced::widget::button;
            button::Style {
                background: Some(iced::Background::Color(iced::Color::from_rgb(0.2, 0.6, 0.3))), // Green background
                text_color: iced::Color::WHITE,
                ..button::Style::default()
            }
        });
    }

    button.into()
}
