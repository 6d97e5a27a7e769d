//! 行内标记与脚注列表的 HTML 生成器。
//!
//! 生成的标记需要与下游阅读器保持逐字节兼容：
//!
//! * 标记: `<span id="InsertNoteID_1_marker1" ...><sup><a href="#InsertNoteID_1">➜</a></sup></span>`
//! * 脚注: `<li id="InsertNoteID_1">正文<span id="InsertNoteID_1_LinkBacks">...</span></li>`

use crate::annotator::types::Footnote;

/// 被注释片段的起始标签。
pub const FRAGMENT_OPEN_TAG: &str = "<strong>";
/// 被注释片段的结束标签。
pub const FRAGMENT_CLOSE_TAG: &str = "</strong>";
/// 脚注列表的起始标签。
pub const NOTE_LIST_OPEN_TAG: &str = r#"<ol id="InsertNote_NoteList">"#;
/// 脚注列表的结束标签。
pub const NOTE_LIST_CLOSE_TAG: &str = "</ol>";

/// 脚注列表项的 id，例如 `InsertNoteID_3`。
#[must_use]
pub fn footnote_anchor_id(id: u32) -> String {
    format!("InsertNoteID_{id}")
}

/// 行内标记的 id，例如 `InsertNoteID_3_marker1`。
#[must_use]
pub fn marker_anchor_id(id: u32) -> String {
    format!("InsertNoteID_{id}_marker1")
}

/// 将行内标记追加到 `output`。
pub fn write_marker(output: &mut String, id: u32) {
    output.push_str(&format!(
        r##"<span id="{marker}" class="InsertNoteMarker"><sup><a href="#{footnote}">➜</a></sup></span>"##,
        marker = marker_anchor_id(id),
        footnote = footnote_anchor_id(id),
    ));
}

/// 将一条脚注列表项追加到 `output`。
pub fn write_footnote_item(output: &mut String, footnote: &Footnote) {
    let footnote_id = footnote_anchor_id(footnote.id);
    output.push_str(&format!(
        r##"<li id="{footnote_id}">{note}<span id="{footnote_id}_LinkBacks"><sup><a href="#{marker}">↩</a></sup></span></li>"##,
        note = footnote.note,
        marker = marker_anchor_id(footnote.id),
    ));
}

/// 渲染完整的脚注列表。
///
/// 即使没有脚注，也会返回空的 `<ol>` 外壳。
#[must_use]
pub fn render_footnote_block(footnotes: &[Footnote]) -> String {
    let mut block = String::with_capacity(
        NOTE_LIST_OPEN_TAG.len() + NOTE_LIST_CLOSE_TAG.len() + footnotes.len() * 160,
    );
    block.push_str(NOTE_LIST_OPEN_TAG);
    for footnote in footnotes {
        write_footnote_item(&mut block, footnote);
    }
    block.push_str(NOTE_LIST_CLOSE_TAG);
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_markup() {
        let mut output = String::new();
        write_marker(&mut output, 7);
        assert_eq!(
            output,
            r##"<span id="InsertNoteID_7_marker1" class="InsertNoteMarker"><sup><a href="#InsertNoteID_7">➜</a></sup></span>"##
        );
    }

    #[test]
    fn test_footnote_item_links_back_to_marker() {
        let mut output = String::new();
        write_footnote_item(
            &mut output,
            &Footnote {
                id: 2,
                note: "<p>注释</p>".to_string(),
            },
        );
        assert_eq!(
            output,
            r##"<li id="InsertNoteID_2"><p>注释</p><span id="InsertNoteID_2_LinkBacks"><sup><a href="#InsertNoteID_2_marker1">↩</a></sup></span></li>"##
        );
    }

    #[test]
    fn test_empty_footnote_block_keeps_wrapper() {
        assert_eq!(
            render_footnote_block(&[]),
            r#"<ol id="InsertNote_NoteList"></ol>"#
        );
    }
}
