/// The captions used in a release message, in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub original_title: &'static str,
    pub director: &'static str,
    pub cast: &'static str,
    pub genres: &'static str,
    pub torrent: &'static str,
    pub info: &'static str,
    pub minutes: &'static str,
    pub list_separator: &'static str,
}

const CHINESE: Labels = Labels {
    title: "名称",
    original_title: "原名",
    director: "导演",
    cast: "演员",
    genres: "类型",
    torrent: "标题",
    info: "信息",
    minutes: "分钟",
    list_separator: " / ",
};

const ENGLISH: Labels = Labels {
    title: "Title",
    original_title: "Original Title",
    director: "Director",
    cast: "Cast",
    genres: "Genres",
    torrent: "Torrent",
    info: "Info",
    minutes: "min",
    list_separator: ", ",
};

impl Labels {
    /// Chinese captions for any `zh` language tag, English otherwise.
    pub fn for_language(language: &str) -> Labels {
        let primary = language.split(|c: char| c == '-' || c == '_').next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("zh") {
            CHINESE
        } else {
            ENGLISH
        }
    }
}
