//! Terminal input and output for the reader.

use storyreader::accessibility::AccessibilityPatch;
use storyreader::media::TermAudioState;
use storyreader::navigation::{NavAction, Panel, PanelState};
use storyreader::session::{SessionCommand, SessionSnapshot, SkipDirection};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(SessionCommand),
    Show,
    Help,
    Quit,
}

/// Input errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("'{0}' needs a {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("Not a number: {0}")]
    NotANumber(String),
}

/// Parse one line of input. Relative adjustments (faster, bigger, ...) are
/// resolved against the current snapshot.
pub fn parse_command(line: &str, current: &SessionSnapshot) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Show);
    };
    let arg = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        "h" | "help" | "?" => return Ok(Input::Help),
        "show" | "s" => return Ok(Input::Show),

        "n" | "next" => SessionCommand::Navigate(NavAction::Next),
        "p" | "prev" | "previous" => SessionCommand::Navigate(NavAction::Previous),
        "g" | "goto" => {
            // Pages are numbered from 1 for the reader
            let page: i64 = number("goto", "page number", arg)?;
            SessionCommand::SelectPage(page.saturating_sub(1))
        }
        "gl" | "glossary" => SessionCommand::SelectGlossary,

        "r" | "read" | "narration" => SessionCommand::ToggleNarration,
        "ff" | "skip+" => SessionCommand::SkipNarration(SkipDirection::Forward),
        "rw" | "skip-" => SessionCommand::SkipNarration(SkipDirection::Backward),
        "speed" => SessionCommand::SetSpeed(number("speed", "value", arg)?),
        "faster" => SessionCommand::SetSpeed(current.narration.speed.increase().value()),
        "slower" => SessionCommand::SetSpeed(current.narration.speed.decrease().value()),

        "v" | "video" => SessionCommand::ToggleVideo,
        "expand" => SessionCommand::ToggleVideoExpanded,
        "replay" | "pause" => SessionCommand::ToggleVideoPlayback,

        "toc" => SessionCommand::TogglePanel(Panel::TableOfContents),
        "a11y" | "options" => SessionCommand::TogglePanel(Panel::Accessibility),
        "close" => SessionCommand::ClosePanel,

        "contrast" => SessionCommand::SetAccessibility(AccessibilityPatch::contrast_level(
            number("contrast", "level 0-4", arg)?,
        )),
        "text" => SessionCommand::SetAccessibility(AccessibilityPatch::text_size_px(number(
            "text",
            "size in px",
            arg,
        )?)),
        "bigger" => SessionCommand::SetAccessibility(AccessibilityPatch::text_size_px(
            i32::from(current.accessibility.text_size_px) + 2,
        )),
        "smaller" => SessionCommand::SetAccessibility(AccessibilityPatch::text_size_px(
            i32::from(current.accessibility.text_size_px) - 2,
        )),
        "zoom" => SessionCommand::SetAccessibility(AccessibilityPatch::image_scale(number(
            "zoom", "scale", arg,
        )?)),
        "reset" => SessionCommand::ResetView,

        "say" | "term-audio" => SessionCommand::ToggleTermAudio(number("say", "term id", arg)?),
        "sign" | "term-video" => SessionCommand::ToggleTermVideo(number("sign", "term id", arg)?),

        other => return Err(InputError::Unknown(other.to_string())),
    };

    Ok(Input::Command(command))
}

fn number<T: std::str::FromStr>(
    verb: &'static str,
    what: &'static str,
    arg: Option<&str>,
) -> Result<T, InputError> {
    let arg = arg.ok_or(InputError::MissingArgument(verb, what))?;
    arg.parse()
        .map_err(|_| InputError::NotANumber(arg.to_string()))
}

pub fn print_help() {
    println!(
        "\
Navigation:    next (n), prev (p), goto <page> (g), glossary (gl)
Narration:     read (r), skip+ (ff), skip- (rw), speed <0.5-2.0>, faster, slower
Sign video:    video (v), expand, replay
Panels:        toc, a11y, close
Reading:       contrast <0-4>, text <24-48>, bigger, smaller, zoom <0.5-2.0>, reset
Glossary:      say <term>, sign <term>
Other:         show, help, quit"
    );
}

/// Print a snapshot, as text or as one line of JSON.
pub fn render(snapshot: &SessionSnapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!("Could not serialize snapshot: {}", e),
        }
        return;
    }

    println!();
    println!("== {} | {} ==", snapshot.book_title, snapshot.progress);

    if let Some(page) = &snapshot.page {
        for line in &page.narration_lines {
            println!("  {}", line);
        }
        println!(
            "  [image {} at {:.1}x, {} layout]",
            page.image_ref,
            snapshot.accessibility.image_scale,
            if snapshot.accessibility.is_default_view {
                "fixed"
            } else {
                "zoomed"
            }
        );
    }

    if let Some(glossary) = &snapshot.glossary {
        println!("  {}", glossary.title);
        for term in &glossary.terms {
            let audio = match snapshot.glossary_media.audio {
                TermAudioState::Playing(id) if id == term.id => " (speaking)",
                TermAudioState::Pending(id) if id == term.id => " (loading)",
                _ => "",
            };
            let video = if snapshot.glossary_media.video == Some(term.id) {
                " (signing)"
            } else {
                ""
            };
            println!(
                "  {:>3}. {}: {}{}{}",
                term.id, term.word, term.definition, audio, video
            );
        }
    }

    let narration = if snapshot.narration.on { "on" } else { "off" };
    let video = match (snapshot.video.visible, snapshot.video.playing) {
        (false, _) => "hidden",
        (true, true) => "playing",
        (true, false) => "paused",
    };
    println!(
        "  narration {} {} | sign video {}{} | {} | text {}px",
        narration,
        snapshot.narration.speed,
        video,
        if snapshot.video.expanded { " (large)" } else { "" },
        snapshot.accessibility.theme_name,
        snapshot.accessibility.text_size_px,
    );

    match snapshot.panel {
        PanelState::Open(Panel::TableOfContents) => {
            println!("  Table of Contents:");
            for entry in &snapshot.table_of_contents {
                let marker = if entry.is_current { ">" } else { " " };
                println!("   {} {:>2}. {}", marker, entry.index + 1, entry.title);
            }
        }
        PanelState::Open(Panel::Accessibility) => {
            println!(
                "  Accessibility: contrast {} ({}, {:.1}:1), text {}px, zoom {:.1}x, speed {}",
                snapshot.accessibility.contrast_level,
                snapshot.accessibility.theme_name,
                snapshot.accessibility.contrast_ratio,
                snapshot.accessibility.text_size_px,
                snapshot.accessibility.image_scale,
                snapshot.narration.speed,
            );
        }
        PanelState::None => {}
    }

    if let Some(notice) = &snapshot.notice {
        println!("  ! {}", notice);
    }
}
