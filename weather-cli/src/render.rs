use weather_core::DisplayState;

const WIDTH: usize = 36;

/// Draw the screen for `state` as plain text.
pub fn render(state: &DisplayState) -> String {
    let mut lines: Vec<String> = state
        .background
        .banner()
        .iter()
        .map(|line| center(line))
        .collect();
    lines.push(String::new());

    if state.loading {
        lines.push(center("Loading..."));
    } else {
        lines.push(center(&state.city.to_uppercase()));
        lines.push(center(&state.condition));
        lines.push(center(&format!("{}°C", state.temperature)));
    }

    if let Some(error) = &state.error {
        lines.push(String::new());
        lines.push(center(&format!("! {error}")));
    }

    lines.push(String::new());
    lines.push("-".repeat(WIDTH));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    let pad = (WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text).trim_end().to_string()
}
