use super::*;

fn texts(panel: &AssistantPanel) -> Vec<(Speaker, &str)> {
    panel
        .transcript()
        .iter()
        .map(|entry| (entry.speaker, entry.text.as_str()))
        .collect()
}

#[test]
fn submit_appends_literal_text_and_disables_input() {
    let mut panel = AssistantPanel::new(true);
    panel.open();
    panel.input = "  what is NaCl?  ".to_string();

    let (seq, query) = panel.submit().expect("query issued");
    assert_eq!(query, "what is NaCl?");
    assert!(panel.input.is_empty());
    assert!(!panel.controls_enabled());
    assert!(!panel.voice_enabled());

    panel.input = "second".to_string();
    assert_eq!(panel.submit(), None);

    assert!(panel.settle(seq, Ok(Some("Table salt.".to_string()))));
    assert!(panel.controls_enabled());
    assert_eq!(
        texts(&panel),
        [
            (Speaker::User, "what is NaCl?"),
            (Speaker::Assistant, "Table salt.")
        ]
    );
}

#[test]
fn blank_submissions_are_ignored() {
    let mut panel = AssistantPanel::new(false);
    panel.input = "   ".to_string();
    assert_eq!(panel.submit(), None);
    assert!(panel.transcript().is_empty());
}

#[test]
fn empty_or_failed_answers_use_fallback_and_reenable() {
    let mut panel = AssistantPanel::new(true);
    panel.input = "one".to_string();
    let (seq, _) = panel.submit().expect("query");
    panel.settle(seq, Ok(None));

    panel.input = "two".to_string();
    let (seq, _) = panel.submit().expect("query");
    panel.settle(seq, Err(ServiceError::Transport("timed out".to_string())));

    assert!(panel.controls_enabled());
    assert!(panel.input_focused());
    let answers: Vec<_> = texts(&panel)
        .into_iter()
        .filter(|(speaker, _)| *speaker == Speaker::Assistant)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(answers, [NO_ANSWER, NO_ANSWER]);
}

#[test]
fn unsupported_voice_is_permanently_disabled() {
    let mut panel = AssistantPanel::new(false);
    assert_eq!(panel.voice_hint(), Some(VOICE_UNSUPPORTED));
    assert!(!panel.voice_enabled());
    assert_eq!(panel.toggle_voice(), None);
    assert_eq!(panel.toggle_voice(), None);
    assert_eq!(panel.voice(), VoiceCapture::Unsupported);
}

#[test]
fn transcript_fills_input_without_submitting() {
    let mut panel = AssistantPanel::new(true);
    let Some(VoiceToggle::Start(seq)) = panel.toggle_voice() else {
        panic!("capture should start");
    };
    assert_eq!(panel.voice(), VoiceCapture::Listening { seq });

    assert!(panel.voice_transcribed(seq, "mix acid and base".to_string()));
    assert_eq!(panel.input, "mix acid and base");
    assert_eq!(panel.voice(), VoiceCapture::Idle);
    assert!(panel.transcript().is_empty());
    assert!(panel.controls_enabled());
}

#[test]
fn stopped_capture_discards_late_transcript() {
    let mut panel = AssistantPanel::new(true);
    let Some(VoiceToggle::Start(seq)) = panel.toggle_voice() else {
        panic!("capture should start");
    };
    assert_eq!(panel.toggle_voice(), Some(VoiceToggle::Stop(seq)));

    assert!(!panel.voice_transcribed(seq, "too late".to_string()));
    assert!(panel.input.is_empty());
}

#[test]
fn capture_end_returns_to_idle() {
    let mut panel = AssistantPanel::new(true);
    let Some(VoiceToggle::Start(seq)) = panel.toggle_voice() else {
        panic!("capture should start");
    };
    panel.voice_ended(seq);
    assert_eq!(panel.voice(), VoiceCapture::Idle);
}

#[test]
fn open_and_close_toggle_visibility() {
    let mut panel = AssistantPanel::new(true);
    assert!(!panel.is_visible());
    panel.open();
    assert!(panel.is_visible());
    assert!(panel.input_focused());
    panel.close();
    assert!(!panel.is_visible());
}
