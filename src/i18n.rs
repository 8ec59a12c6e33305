//! Trilingual interface strings.

use crate::models::Locale;

#[derive(Clone, Copy, Debug)]
pub struct I18nText {
    pub zh: &'static str,
    pub ja: &'static str,
    pub en: &'static str,
}

/// Text for `locale`, or the English text when that translation is empty
pub fn t(text: &I18nText, locale: Locale) -> &'static str {
    let localized = match locale {
        Locale::Zh => text.zh,
        Locale::Ja => text.ja,
        Locale::En => text.en,
    };
    if localized.is_empty() { text.en } else { localized }
}

macro_rules! text {
    ($name:ident, $zh:expr, $ja:expr, $en:expr) => {
        pub const $name: I18nText = I18nText {
            zh: $zh,
            ja: $ja,
            en: $en,
        };
    };
}

pub mod nav {
    use super::I18nText;
    text!(CARDS, "卡片", "カード", "Cards");
    text!(REVIEW, "复习", "レビュー", "Review");
    text!(OPEN_CATALOG, "打开卡片库", "カタログを開く", "Open catalog");
    text!(RELOAD, "重新加载", "再読み込み", "Reload");
}

pub mod card {
    use super::I18nText;
    text!(QUESTION, "问题", "問題", "Question");
    text!(ANSWER, "答案", "回答", "Answer");
    text!(SHOW_ANSWER, "显示答案", "回答を表示", "Show Answer");
    text!(SHOW_QUESTION, "显示问题", "問題を表示", "Show Question");
    text!(FAVORITE, "收藏", "お気に入り", "Favorite");
    text!(FAVORITED, "已收藏", "お気に入り済み", "Favorited");
    text!(MARK_HARD, "困难", "難しい", "Hard");
    text!(MARK_GOOD, "一般", "普通", "Good");
    text!(MARK_EASY, "简单", "簡単", "Easy");
    text!(CATEGORY, "分类", "カテゴリ", "Category");
    text!(TAGS, "标签", "タグ", "Tags");
    text!(MISSING_CONTENT, "此卡片没有内容", "このカードには内容がありません", "This card has no content");
}

pub mod cards_page {
    use super::I18nText;
    text!(TITLE, "知识卡片", "ナレッジカード", "Knowledge Cards");
    text!(TOTAL_CARDS, "总卡片数", "総カード数", "Total Cards");
    text!(CATEGORIES, "分类数", "カテゴリ数", "Categories");
    text!(NO_CARDS, "还没有卡片", "まだカードがありません", "No Cards Yet");
}

pub mod review_page {
    use super::I18nText;
    text!(TITLE, "每日复习", "毎日のレビュー", "Daily Review");
    text!(SUBTITLE, "复习标记为困难或尚未复习的卡片", "難しい・未レビューのカードを復習", "Review cards rated hard or not yet reviewed");
    text!(CARDS_TO_REVIEW, "张卡片待复习", "枚のカードをレビュー", "cards to review");
    text!(ALL_CAUGHT_UP, "全部完成！", "完了しました！", "All Caught Up!");
    text!(CONGRATS, "待复习的卡片已全部完成！", "レビュー待ちのカードはすべて完了です！", "You've reviewed all your due cards!");
    text!(NEXT, "下一个", "次へ", "Next");
    text!(PREVIOUS, "上一个", "前へ", "Previous");
}

pub mod stats {
    use super::I18nText;
    text!(TOTAL, "总计", "合計", "Total");
    text!(REVIEWED, "已复习", "レビュー済み", "Reviewed");
    text!(NEED_WORK, "需加强", "要復習", "Need Work");
    text!(PENDING, "待复习", "レビュー待ち", "Pending");
}

pub mod loading {
    use super::I18nText;
    text!(LOADING_PROGRESS, "加载进度中...", "進捗を読み込み中...", "Loading progress...");
}

pub mod error {
    use super::I18nText;
    text!(LOAD_FAILED, "加载失败", "読み込みに失敗しました", "Failed to load");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_per_locale() {
        assert_eq!(t(&card::MARK_HARD, Locale::Zh), "困难");
        assert_eq!(t(&card::MARK_HARD, Locale::Ja), "難しい");
        assert_eq!(t(&card::MARK_HARD, Locale::En), "Hard");
    }

    #[test]
    fn test_empty_translation_falls_back_to_english() {
        let text = I18nText {
            zh: "",
            ja: "",
            en: "Fallback",
        };
        assert_eq!(t(&text, Locale::Zh), "Fallback");
        assert_eq!(t(&text, Locale::Ja), "Fallback");
    }
}
