//! Catalog of selectable neural voices.

use serde::Serialize;

/// Voice gender as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Gender {
    /// Female voice
    Female,
    /// Male voice
    Male,
}

/// One selectable voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    /// Identifier sent to the speech service
    pub short_name: &'static str,
    /// Display name
    pub name: &'static str,
    /// Voice gender
    pub gender: Gender,
    /// BCP 47 locale, possibly with a regional suffix
    pub locale: &'static str,
}

const fn voice(
    short_name: &'static str,
    name: &'static str,
    gender: Gender,
    locale: &'static str,
) -> VoiceInfo {
    VoiceInfo {
        short_name,
        name,
        gender,
        locale,
    }
}

/// Chinese voices first, then English.
pub const VOICE_CATALOG: &[VoiceInfo] = &[
    voice("zh-HK-HiuGaaiNeural", "HiuGaai (Hong Kong)", Gender::Female, "zh-HK"),
    voice("zh-HK-HiuMaanNeural", "HiuMaan (Hong Kong)", Gender::Female, "zh-HK"),
    voice("zh-HK-WanLungNeural", "WanLung (Hong Kong)", Gender::Male, "zh-HK"),
    voice("zh-CN-XiaoxiaoNeural", "Xiaoxiao (China)", Gender::Female, "zh-CN"),
    voice("zh-CN-XiaoyiNeural", "Xiaoyi (China)", Gender::Female, "zh-CN"),
    voice("zh-CN-YunjianNeural", "Yunjian (China)", Gender::Male, "zh-CN"),
    voice("zh-CN-YunxiNeural", "Yunxi (China)", Gender::Male, "zh-CN"),
    voice("zh-CN-YunxiaNeural", "Yunxia (China)", Gender::Male, "zh-CN"),
    voice("zh-CN-YunyangNeural", "Yunyang (China)", Gender::Male, "zh-CN"),
    voice("zh-CN-liaoning-XiaobeiNeural", "Xiaobei (Liaoning)", Gender::Female, "zh-CN-liaoning"),
    voice("zh-TW-HsiaoChenNeural", "HsiaoChen (Taiwan)", Gender::Female, "zh-TW"),
    voice("zh-TW-YunJheNeural", "YunJhe (Taiwan)", Gender::Male, "zh-TW"),
    voice("zh-TW-HsiaoYuNeural", "HsiaoYu (Taiwan)", Gender::Female, "zh-TW"),
    voice("zh-CN-shaanxi-XiaoniNeural", "Xiaoni (Shaanxi)", Gender::Female, "zh-CN-shaanxi"),
    voice("en-AU-NatashaNeural", "Natasha (Australia)", Gender::Female, "en-AU"),
    voice("en-AU-WilliamNeural", "William (Australia)", Gender::Male, "en-AU"),
    voice("en-CA-ClaraNeural", "Clara (Canada)", Gender::Female, "en-CA"),
    voice("en-CA-LiamNeural", "Liam (Canada)", Gender::Male, "en-CA"),
    voice("en-HK-SamNeural", "Sam (Hong Kong)", Gender::Male, "en-HK"),
    voice("en-HK-YanNeural", "Yan (Hong Kong)", Gender::Female, "en-HK"),
    voice("en-IN-NeerjaNeural", "Neerja (India)", Gender::Female, "en-IN"),
    voice("en-IN-PrabhatNeural", "Prabhat (India)", Gender::Male, "en-IN"),
    voice("en-IE-ConnorNeural", "Connor (Ireland)", Gender::Male, "en-IE"),
    voice("en-IE-EmilyNeural", "Emily (Ireland)", Gender::Female, "en-IE"),
    voice("en-KE-AsiliaNeural", "Asilia (Kenya)", Gender::Female, "en-KE"),
    voice("en-KE-ChilembaNeural", "Chilemba (Kenya)", Gender::Male, "en-KE"),
    voice("en-NZ-MitchellNeural", "Mitchell (New Zealand)", Gender::Male, "en-NZ"),
    voice("en-NZ-MollyNeural", "Molly (New Zealand)", Gender::Female, "en-NZ"),
    voice("en-NG-AbeoNeural", "Abeo (Nigeria)", Gender::Male, "en-NG"),
    voice("en-NG-EzinneNeural", "Ezinne (Nigeria)", Gender::Female, "en-NG"),
    voice("en-PH-JamesNeural", "James (Philippines)", Gender::Male, "en-PH"),
    voice("en-PH-RosaNeural", "Rosa (Philippines)", Gender::Female, "en-PH"),
    voice("en-SG-LunaNeural", "Luna (Singapore)", Gender::Female, "en-SG"),
    voice("en-SG-WayneNeural", "Wayne (Singapore)", Gender::Male, "en-SG"),
    voice("en-ZA-LeahNeural", "Leah (South Africa)", Gender::Female, "en-ZA"),
    voice("en-ZA-LukeNeural", "Luke (South Africa)", Gender::Male, "en-ZA"),
    voice("en-TZ-ElimuNeural", "Elimu (Tanzania)", Gender::Male, "en-TZ"),
    voice("en-TZ-ImaniNeural", "Imani (Tanzania)", Gender::Female, "en-TZ"),
    voice("en-GB-LibbyNeural", "Libby (UK)", Gender::Female, "en-GB"),
    voice("en-GB-MaisieNeural", "Maisie (UK)", Gender::Female, "en-GB"),
    voice("en-GB-RyanNeural", "Ryan (UK)", Gender::Male, "en-GB"),
    voice("en-GB-SoniaNeural", "Sonia (UK)", Gender::Female, "en-GB"),
    voice("en-GB-ThomasNeural", "Thomas (UK)", Gender::Male, "en-GB"),
    voice("en-US-AriaNeural", "Aria (US)", Gender::Female, "en-US"),
    voice("en-US-AnaNeural", "Ana (US)", Gender::Female, "en-US"),
    voice("en-US-ChristopherNeural", "Christopher (US)", Gender::Male, "en-US"),
    voice("en-US-EricNeural", "Eric (US)", Gender::Male, "en-US"),
    voice("en-US-GuyNeural", "Guy (US)", Gender::Male, "en-US"),
    voice("en-US-JennyNeural", "Jenny (US)", Gender::Female, "en-US"),
    voice("en-US-MichelleNeural", "Michelle (US)", Gender::Female, "en-US"),
    voice("en-US-RogerNeural", "Roger (US)", Gender::Male, "en-US"),
    voice("en-US-SteffanNeural", "Steffan (US)", Gender::Male, "en-US"),
];

/// Look up a voice by its short name.
pub fn find_voice(short_name: &str) -> Option<&'static VoiceInfo> {
    VOICE_CATALOG.iter().find(|v| v.short_name == short_name)
}
