use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar in the shared converter style, e.g. `progress_bar(n, "datasets")`.
pub fn progress_bar(len: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = format!(
        "[{{bar:40.green/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
        unit
    );
    let style = ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("▉▊▋▌▍▎▏ ");
    pb.set_style(style);
    pb
}
