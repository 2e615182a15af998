//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a node kind, as named by [`Block::kind`].
///
/// [`Block::kind`]: crate::ir::nodes::Block::kind
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Paragraph" => "¶",
        "Heading" => "⊤",
        "CodeBlock" => "𝒱",
        "BulletList" => "☰",
        "OrderedList" => "№",
        "ListItem" => "•",
        "ImageFigure" => "▣",
        "VideoEmbed" => "▶",
        "Text" => "◦",
        "HardBreak" => "↵",
        _ => "○",
    }
}
