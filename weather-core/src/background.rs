//! Condition-to-background mapping.
//!
//! Each recognised provider label selects its own backdrop; everything
//! else falls back to [`Background::Default`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Clear,
    Rain,
    Clouds,
    Thunderstorm,
    Snow,
    Drizzle,
    #[default]
    Default,
}

impl Background {
    /// Resolve a provider condition label. Labels are matched exactly.
    pub fn for_condition(condition: &str) -> Self {
        match condition {
            "Clear" => Background::Clear,
            "Rain" => Background::Rain,
            "Clouds" => Background::Clouds,
            "Thunderstorm" => Background::Thunderstorm,
            "Snow" => Background::Snow,
            "Drizzle" => Background::Drizzle,
            _ => Background::Default,
        }
    }

    /// Image asset backing this background.
    pub fn asset(&self) -> &'static str {
        match self {
            Background::Clear => "clear.png",
            Background::Rain => "rain.png",
            Background::Clouds => "heavy-cloud.png",
            Background::Thunderstorm => "thunder.png",
            Background::Snow => "snow.png",
            Background::Drizzle => "drizzle.png",
            Background::Default => "light-cloud.png",
        }
    }

    /// Terminal art drawn behind the reading.
    pub fn banner(&self) -> &'static [&'static str] {
        match self {
            Background::Clear => &[
                r"    \   /    ",
                r"     .-.     ",
                r"  ― (   ) ―  ",
                r"     `-'     ",
                r"    /   \    ",
            ],
            Background::Rain => &[
                r"     .-.     ",
                r"    (   ).   ",
                r"   (___(__)  ",
                r"   ʻ ʻ ʻ ʻ   ",
                r"  ʻ ʻ ʻ ʻ    ",
            ],
            Background::Clouds => &[
                r"             ",
                r"     .--.    ",
                r"  .-(    ).  ",
                r" (___.__)__) ",
                r"             ",
            ],
            Background::Thunderstorm => &[
                r"     .-.     ",
                r"    (   ).   ",
                r"   (___(__)  ",
                r"   ⚡ʻ ʻ⚡ʻ  ",
                r"   ʻ ʻ ʻ ʻ   ",
            ],
            Background::Snow => &[
                r"     .-.     ",
                r"    (   ).   ",
                r"   (___(__)  ",
                r"    *  *  *  ",
                r"   *  *  *   ",
            ],
            Background::Drizzle => &[
                r"     .-.     ",
                r"    (   ).   ",
                r"   (___(__)  ",
                r"    ʻ  ʻ  ʻ  ",
                r"             ",
            ],
            Background::Default => &[
                r"   \  /      ",
                r" _ /''.-.    ",
                r"   \_(   ).  ",
                r"   /(___(__) ",
                r"             ",
            ],
        }
    }
}
