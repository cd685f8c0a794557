use linkcard_core::{AppViewModel, ClipboardStatus, DownloadStatus};

/// Lines describing the form and its result, printed after each change.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("URL:         {}", or_dash(&view.raw_url)));
    lines.push(format!(
        "Style:       {} ({})",
        view.style.label(),
        view.style.description()
    ));
    lines.push(format!("Title:       {}", or_dash(&view.custom_title)));
    lines.push(format!("Description: {}", or_dash(&view.custom_description)));

    let status = if view.is_loading {
        "Generating...".to_string()
    } else if let Some(error) = &view.error {
        format!("Error: {error}")
    } else if let Some(image) = view.image {
        format!("Card ready (image {image}); `copy` or `download` it")
    } else if view.can_submit {
        "Ready, type `submit`".to_string()
    } else {
        "Enter a URL to begin".to_string()
    };
    lines.push(status);

    match &view.copy_status {
        ClipboardStatus::Idle => {}
        ClipboardStatus::Success { message } | ClipboardStatus::Failure { message } => {
            lines.push(format!("Clipboard: {message}"));
        }
    }

    match &view.download_status {
        Some(DownloadStatus::Saved(path)) => {
            lines.push(format!("Saved to {}", path.display()));
        }
        Some(DownloadStatus::Failed(err)) => lines.push(format!("Download failed: {err}")),
        None => {}
    }

    lines
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use linkcard_core::CardStyle;

    use super::*;

    #[test]
    fn empty_form_prompts_for_url() {
        let lines = render(&AppViewModel::default());

        assert_eq!(lines[0], "URL:         -");
        assert!(lines.contains(&"Enter a URL to begin".to_string()));
    }

    #[test]
    fn error_takes_precedence_over_ready() {
        let view = AppViewModel {
            raw_url: "not a url".to_string(),
            can_submit: true,
            error: Some("Please enter a valid URL".to_string()),
            ..AppViewModel::default()
        };

        let lines = render(&view);

        assert!(lines.contains(&"Error: Please enter a valid URL".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("Ready")));
    }

    #[test]
    fn success_shows_clipboard_and_download_feedback() {
        let view = AppViewModel {
            raw_url: "example.com".to_string(),
            style: CardStyle::Wechat,
            can_submit: true,
            image: Some(3),
            copy_status: ClipboardStatus::Success {
                message: "Copied!".to_string(),
            },
            download_status: Some(DownloadStatus::Saved(PathBuf::from("out/link-to-image.png"))),
            ..AppViewModel::default()
        };

        let lines = render(&view);

        assert!(lines[1].starts_with("Style:       WeChat green"));
        assert!(lines.iter().any(|line| line.starts_with("Card ready (image 3)")));
        assert!(lines.contains(&"Clipboard: Copied!".to_string()));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("Saved to ") && line.ends_with("link-to-image.png")));
    }
}
