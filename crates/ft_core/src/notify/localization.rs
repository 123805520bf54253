//! Notification Localization
//!
//! Fluent (FTL) 기반 다국어 알림 텍스트

use fluent::{FluentArgs, FluentBundle, FluentResource};
use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

use crate::error::{FrozenTagError, Result};

/// 지원 언어
pub const SUPPORTED_LOCALES: &[&str] = &["en-US", "ko-KR"];

pub const FALLBACK_LOCALE: &str = "en-US";

const EN_US: &str = r#"
round-start = Avoid the freezers! { $seconds } seconds on the clock.
player-frozen = { $player } was frozen!
player-thawed = { $by } thawed { $player }!
player-auto-thawed = { $player } thawed out.
team-wins = { $team } wins!
round-no-winner = Time's up. Nobody wins.
round-all-frozen = Everyone is frozen. Nobody wins.
round-aborted = Round stopped. Nobody wins.
"#;

const KO_KR: &str = r#"
round-start = 프리저를 피하세요! 제한 시간 { $seconds }초.
player-frozen = { $player } 얼어붙었습니다!
player-thawed = { $by } 님이 { $player } 님을 녹였습니다!
player-auto-thawed = { $player } 님이 스스로 녹았습니다.
team-wins = { $team } 승리!
round-no-winner = 시간 종료. 승자 없음.
round-all-frozen = 모두 얼어붙었습니다. 승자 없음.
round-aborted = 라운드 중단. 승자 없음.
"#;

/// 알림 텍스트 로컬라이저
pub struct NotificationLocalizer {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
}

impl NotificationLocalizer {
    /// Embedded resources, locale negotiated against `requested`.
    pub fn new(requested: &str) -> Result<Self> {
        let mut localizer = Self { bundles: HashMap::new(), current_locale: FALLBACK_LOCALE.into() };
        localizer.load_locale("en-US", EN_US)?;
        localizer.load_locale("ko-KR", KO_KR)?;
        localizer.current_locale = localizer.negotiate_locale(&[requested]);
        Ok(localizer)
    }

    /// 특정 언어 리소스 로드
    pub fn load_locale(&mut self, locale: &str, ftl_content: &str) -> Result<()> {
        let resource = FluentResource::try_new(ftl_content.to_string())
            .map_err(|_| FrozenTagError::Localization(format!("Failed to parse FTL for {locale}")))?;

        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|_| FrozenTagError::Localization(format!("Invalid locale: {locale}")))?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        // Plain text for the host's HUD: no bidi isolation marks around names.
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|_| FrozenTagError::Localization(format!("Duplicate keys in {locale}")))?;

        self.bundles.insert(locale.to_string(), bundle);
        Ok(())
    }

    pub fn locale(&self) -> &str {
        &self.current_locale
    }

    /// 자동 언어 협상
    pub fn negotiate_locale(&self, requested: &[&str]) -> String {
        let available: Vec<LanguageIdentifier> =
            self.bundles.keys().filter_map(|k| k.parse().ok()).collect();
        let requested: Vec<LanguageIdentifier> =
            requested.iter().filter_map(|l| l.parse().ok()).collect();
        let Ok(default) = FALLBACK_LOCALE.parse::<LanguageIdentifier>() else {
            return FALLBACK_LOCALE.to_string();
        };

        let negotiated = negotiate_languages(
            &requested,
            &available,
            Some(&default),
            NegotiationStrategy::Filtering,
        );

        negotiated
            .first()
            .map(|l| l.to_string())
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
    }

    /// 메시지 포맷팅. Unknown keys come back as `[key]`.
    pub fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.clone());
        }

        for locale in [self.current_locale.as_str(), FALLBACK_LOCALE] {
            let Some(bundle) = self.bundles.get(locale) else {
                continue;
            };
            let Some(pattern) = bundle.get_message(key).and_then(|m| m.value()) else {
                continue;
            };
            let mut errors = vec![];
            let text = bundle.format_pattern(pattern, Some(&fluent_args), &mut errors);
            if !errors.is_empty() {
                log::warn!("Fluent errors formatting '{}': {:?}", key, errors);
            }
            return text.into_owned();
        }

        format!("[{}]", key)
    }
}
