//! 結果の種別ごとの描画ルール
//!
//! ToolResult の各バリアントを ViewModel に変換する

use crate::flags::FlagEntry;
use crate::panel::PanelId;
use crate::result::{value_to_text, ImageMetadata, ToolReply, ToolResult, WordGroup};
use crate::view::{ListItem, Tone, ViewModel, ViewNode};

pub const NO_RESULT_TEXT: &str = "There was no result for this.";
pub const EMPTY_LIST_TEXT: &str = "No Results";
pub const NO_EXIF_TEXT: &str = "No Exif";
pub const NO_FLAGS_TEXT: &str = "No matching flags";
pub const MAP_LINK_LABEL: &str = "Maps link";
pub const MAP_LINK_TITLE: &str = "Maps Link";

/// 件数上限超過メッセージ
pub fn too_many_text(cap: usize) -> String {
    format!("Over {} results, please narrow down", cap)
}

/// 通信エラーメッセージ
pub fn transport_error_text(message: &str) -> String {
    format!("Error requesting data: {}", message)
}

/// レスポンスを描画
///
/// `cap` が `None` の場合は件数上限なし。アイデア一覧は ideas モジュールで描画する
pub fn render_reply(panel: PanelId, reply: &ToolReply, cap: Option<usize>) -> ViewModel {
    match reply {
        // EXIFは結果なしの場合、領域をクリアするだけ
        ToolReply::NoResult if panel == PanelId::ExifUpload => ViewModel::empty(),
        ToolReply::NoResult => ViewModel::message(NO_RESULT_TEXT, Tone::Info),
        ToolReply::Data(ToolResult::SimpleList(items)) => render_simple_list(items, cap),
        ToolReply::Data(ToolResult::GroupedList(groups)) => render_grouped_list(groups, cap),
        ToolReply::Data(ToolResult::ImageMetadata(meta)) => render_image_metadata(meta.as_ref(), cap),
        ToolReply::Data(ToolResult::IdeaSet(_)) => ViewModel::empty(),
    }
}

pub fn render_transport_error(message: &str) -> ViewModel {
    ViewModel::message(transport_error_text(message), Tone::Error)
}

/// 単純リスト（モールス・T9・解析）
pub fn render_simple_list(items: &[String], cap: Option<usize>) -> ViewModel {
    let list = if items.is_empty() {
        vec![ListItem::text(EMPTY_LIST_TEXT)]
    } else if let Some(cap) = cap.filter(|cap| items.len() > *cap) {
        vec![ListItem::text(too_many_text(cap))]
    } else {
        items.iter().map(ListItem::text).collect()
    };
    ViewModel::dismissable_list(list)
}

/// 辞書ごとのリスト（アナグラム・マッチ）
///
/// 上限判定は全グループの単語数の合計で行う
pub fn render_grouped_list(groups: &[WordGroup], cap: Option<usize>) -> ViewModel {
    let total: usize = groups.iter().map(|group| group.words.len()).sum();
    let list = if groups.is_empty() {
        vec![ListItem::text(EMPTY_LIST_TEXT)]
    } else if let Some(cap) = cap.filter(|cap| total > *cap) {
        vec![ListItem::text(too_many_text(cap))]
    } else {
        groups
            .iter()
            .map(|group| {
                ListItem::group(&group.dictionary, group.words.iter().map(ListItem::text).collect())
            })
            .collect()
    };
    ViewModel::dismissable_list(list)
}

/// 画像メタデータ
pub fn render_image_metadata(meta: Option<&ImageMetadata>, cap: Option<usize>) -> ViewModel {
    let Some(meta) = meta else {
        return ViewModel::dismissable_list(Vec::new());
    };

    let exif = meta.exif();
    let mut list = vec![
        ListItem::text(format!("Size: {}x{}", meta.width, meta.height)),
        ListItem::text(format!("Type: {}", meta.image_type)),
    ];

    if let Some(link) = &exif.map_link {
        list.push(ListItem::link(MAP_LINK_LABEL, link, MAP_LINK_TITLE));
    }
    if let Some(datetime) = exif.datetime.as_deref().filter(|d| !d.is_empty()) {
        list.push(ListItem::text(datetime));
    }
    if let Some(comments) = exif.comments.as_deref().filter(|c| !c.is_empty()) {
        list.push(ListItem::text(comments));
    }

    match &exif.raw_values {
        None => list.push(ListItem::text(NO_EXIF_TEXT)),
        Some(values) => match cap.filter(|cap| values.len() > *cap) {
            Some(cap) => list.push(ListItem::text(too_many_text(cap))),
            None => list.extend(
                values
                    .iter()
                    .map(|(key, value)| ListItem::text(format!("{}: {}", key, value_to_text(value.clone())))),
            ),
        },
    }

    ViewModel::dismissable_list(list)
}

/// 国旗検索結果
///
/// 呼び出し側で空クエリは描画しない（何も表示しない）こと
pub fn render_flags(entries: &[&FlagEntry]) -> ViewModel {
    if entries.is_empty() {
        return ViewModel::message(NO_FLAGS_TEXT, Tone::Info);
    }

    let mut nodes = Vec::with_capacity(entries.len() + 1);
    nodes.push(ViewNode::Dismiss);
    nodes.extend(entries.iter().map(|entry| ViewNode::FlagCard {
        country: crate::view::sanitize_text(&entry.country),
        image_src: entry.image_path(),
    }));
    ViewModel { nodes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ExifData;
    use serde_json::{json, Map};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_result_message() {
        let view = render_reply(PanelId::Morse, &ToolReply::NoResult, Some(1000));
        assert_eq!(view.texts(), vec![NO_RESULT_TEXT]);
        assert!(!view.has_dismiss());
    }

    #[test]
    fn test_no_result_differs_from_transport_error() {
        let empty = render_reply(PanelId::T9, &ToolReply::NoResult, Some(1000));
        let error = render_transport_error("Network Error");
        assert_ne!(empty, error);
        assert_eq!(error.texts(), vec!["Error requesting data: Network Error"]);
    }

    #[test]
    fn test_exif_no_result_clears() {
        let view = render_reply(PanelId::ExifUpload, &ToolReply::NoResult, None);
        assert!(view.is_empty());
    }

    #[test]
    fn test_simple_list_items() {
        let view = render_simple_list(&words(&["sos", "eat"]), Some(1000));
        assert!(view.has_dismiss());
        assert_eq!(view.texts(), vec!["sos", "eat"]);
    }

    #[test]
    fn test_simple_list_empty() {
        let view = render_simple_list(&[], Some(1000));
        assert_eq!(view.texts(), vec![EMPTY_LIST_TEXT]);
    }

    #[test]
    fn test_simple_list_over_cap_renders_single_message() {
        let items: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        let view = render_simple_list(&items, Some(3));
        assert_eq!(view.texts(), vec!["Over 3 results, please narrow down"]);

        let at_cap = render_simple_list(&items, Some(4));
        assert_eq!(at_cap.texts().len(), 4);
    }

    #[test]
    fn test_simple_list_uncapped() {
        let items: Vec<String> = (0..2000).map(|i| i.to_string()).collect();
        let view = render_simple_list(&items, None);
        assert_eq!(view.texts().len(), 2000);
    }

    #[test]
    fn test_grouped_list_two_levels() {
        let groups = vec![WordGroup {
            dictionary: "dictionary1".into(),
            words: words(&["act", "cat"]),
        }];
        let view = render_grouped_list(&groups, Some(1000));
        let ViewNode::List { items } = &view.nodes[1] else {
            panic!("list expected");
        };
        assert_eq!(
            items,
            &vec![ListItem::group("dictionary1", vec![ListItem::text("act"), ListItem::text("cat")])]
        );
    }

    #[test]
    fn test_grouped_list_cap_counts_all_words() {
        let groups = vec![
            WordGroup { dictionary: "a".into(), words: words(&["x", "y"]) },
            WordGroup { dictionary: "b".into(), words: words(&["z"]) },
        ];
        let view = render_grouped_list(&groups, Some(2));
        assert_eq!(view.texts(), vec!["Over 2 results, please narrow down"]);
    }

    #[test]
    fn test_image_metadata_full() {
        let mut raw = Map::new();
        raw.insert("Make".into(), json!("Canon"));
        raw.insert("ISOSpeedRatings".into(), json!(200));
        let meta = ImageMetadata {
            width: 640,
            height: 480,
            image_type: "jpeg".into(),
            exif_data: Some(ExifData {
                map_link: Some("https://www.google.com/maps/search/?api=1&query=1.000000,2.000000".into()),
                datetime: Some("2020-01-02T03:04:05Z".into()),
                comments: Some("holiday".into()),
                raw_values: Some(raw),
            }),
            ..Default::default()
        };
        let view = render_image_metadata(Some(&meta), None);
        assert_eq!(
            view.texts(),
            vec![
                "Size: 640x480",
                "Type: jpeg",
                MAP_LINK_LABEL,
                "2020-01-02T03:04:05Z",
                "holiday",
                "Make: Canon",
                "ISOSpeedRatings: 200",
            ]
        );
    }

    #[test]
    fn test_image_metadata_without_exif() {
        let meta = ImageMetadata {
            width: 1,
            height: 1,
            image_type: "png".into(),
            ..Default::default()
        };
        let view = render_image_metadata(Some(&meta), None);
        assert_eq!(view.texts(), vec!["Size: 1x1", "Type: png", NO_EXIF_TEXT]);
    }

    #[test]
    fn test_image_metadata_null() {
        let view = render_image_metadata(None, None);
        assert!(view.has_dismiss());
        assert!(view.texts().is_empty());
    }

    #[test]
    fn test_render_flags() {
        let japan = FlagEntry {
            country: "Japan".into(),
            image: "jp".into(),
            ..Default::default()
        };
        let view = render_flags(&[&japan]);
        assert!(view.has_dismiss());
        assert!(view.nodes.contains(&ViewNode::FlagCard {
            country: "Japan".into(),
            image_src: "/flags/jp.webp".into(),
        }));
    }

    #[test]
    fn test_render_flags_no_match() {
        let view = render_flags(&[]);
        assert_eq!(view.texts(), vec![NO_FLAGS_TEXT]);
    }
}
