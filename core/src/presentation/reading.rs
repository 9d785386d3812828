//! Flavor text for a finished character

use serde::{Deserialize, Serialize};

/// Language used for reading text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingTier {
    Beginner,
    Charming,
    Impressive,
    Rare,
    Legendary,
}

impl ReadingTier {
    pub fn for_score(score: f32) -> Self {
        if score >= 0.9 {
            ReadingTier::Legendary
        } else if score >= 0.8 {
            ReadingTier::Rare
        } else if score >= 0.6 {
            ReadingTier::Impressive
        } else if score >= 0.4 {
            ReadingTier::Charming
        } else {
            ReadingTier::Beginner
        }
    }

    pub fn text(self, language: Language) -> &'static str {
        match (self, language) {
            (ReadingTier::Legendary, Language::Zh) => {
                "🌟 传奇级别！你创造了神话中的'天界精华'！这个形态散发着纯净的宇宙能量，带来无上的好运！"
            }
            (ReadingTier::Rare, Language::Zh) => {
                "✨ 稀有发现！你的创作达到了'黄金和谐'境界 - 一种极其美丽和强大的形态！"
            }
            (ReadingTier::Impressive, Language::Zh) => {
                "🎭 令人印象深刻！这个形态展现出巨大的潜力和艺术天赋。你有天生的创作才能！"
            }
            (ReadingTier::Charming, Language::Zh) => {
                "😊 迷人可爱！你的创作有着独特的个性，为观者带来欢乐。"
            }
            (ReadingTier::Beginner, Language::Zh) => {
                "🌱 初学者的作品！每个大师都从这里开始。这个形态有潜力 - 继续实验吧！"
            }
            (ReadingTier::Legendary, Language::En) => {
                "🌟 Legendary! You have created the mythical 'Celestial Essence'! This form radiates pure cosmic energy and brings supreme fortune!"
            }
            (ReadingTier::Rare, Language::En) => {
                "✨ Rare discovery! Your creation has reached 'Golden Harmony', a form of rare beauty and power!"
            }
            (ReadingTier::Impressive, Language::En) => {
                "🎭 Impressive! This form shows great potential and artistic flair. You are a natural creator!"
            }
            (ReadingTier::Charming, Language::En) => {
                "😊 Charming! Your creation has a personality all its own and brings joy to anyone who sees it."
            }
            (ReadingTier::Beginner, Language::En) => {
                "🌱 A beginner's work! Every master starts here. This form has potential, so keep experimenting!"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub tier: ReadingTier,
    pub stars: u8,
    pub text: &'static str,
}

/// Number of filled stars (0..=5) for a score
pub fn stars(score: f32) -> u8 {
    (score.clamp(0.0, 1.0) * 5.0).floor() as u8
}

pub fn reading(score: f32, language: Language) -> Reading {
    let tier = ReadingTier::for_score(score);
    Reading {
        tier,
        stars: stars(score),
        text: tier.text(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ReadingTier::for_score(0.0), ReadingTier::Beginner);
        assert_eq!(ReadingTier::for_score(0.39), ReadingTier::Beginner);
        assert_eq!(ReadingTier::for_score(0.4), ReadingTier::Charming);
        assert_eq!(ReadingTier::for_score(0.6), ReadingTier::Impressive);
        assert_eq!(ReadingTier::for_score(0.8), ReadingTier::Rare);
        assert_eq!(ReadingTier::for_score(0.9), ReadingTier::Legendary);
        assert_eq!(ReadingTier::for_score(1.0), ReadingTier::Legendary);
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(0.0), 0);
        assert_eq!(stars(0.2), 1);
        assert_eq!(stars(0.59), 2);
        assert_eq!(stars(1.0), 5);
        assert_eq!(stars(3.0), 5);
        assert_eq!(stars(-1.0), 0);
    }

    #[test]
    fn test_languages() {
        let zh = reading(0.95, Language::Zh);
        assert!(zh.text.contains("传奇"));
        let en = reading(0.95, Language::En);
        assert!(en.text.contains("Legendary"));
        assert_eq!(zh.tier, en.tier);
    }

    #[test]
    fn test_language_serde() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        let zh: Language = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(zh, Language::Zh);
    }
}
