//! 媒体文件类型识别

/// 媒体库支持的文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Png,
    Jpeg,
    Gif,
    Webp,
    Svg,
    Pdf,
}

impl MediaKind {
    /// `extension` 带点号，如 ".png"
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            ".png" => Some(MediaKind::Png),
            ".jpg" | ".jpeg" => Some(MediaKind::Jpeg),
            ".gif" => Some(MediaKind::Gif),
            ".webp" => Some(MediaKind::Webp),
            ".svg" => Some(MediaKind::Svg),
            ".pdf" => Some(MediaKind::Pdf),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::Png => "image/png",
            MediaKind::Jpeg => "image/jpeg",
            MediaKind::Gif => "image/gif",
            MediaKind::Webp => "image/webp",
            MediaKind::Svg => "image/svg+xml",
            MediaKind::Pdf => "application/pdf",
        }
    }

    /// 检查文件开头字节是否与类型一致
    pub fn matches(&self, head: &[u8]) -> bool {
        match self {
            MediaKind::Png => head.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            MediaKind::Jpeg => head.starts_with(&[0xFF, 0xD8, 0xFF]),
            MediaKind::Gif => head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a"),
            MediaKind::Webp => {
                head.len() >= 12 && &head[0..4] == b"RIFF" && &head[8..12] == b"WEBP"
            }
            MediaKind::Pdf => head.starts_with(b"%PDF"),
            MediaKind::Svg => looks_like_svg(head),
        }
    }
}

// SVG 是文本格式：跳过 BOM 与空白后应以 `<?xml` 或 `<svg` 开头
fn looks_like_svg(head: &[u8]) -> bool {
    let head = head.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];
    head.starts_with(b"<?xml") || head.starts_with(b"<svg") || head.starts_with(b"<!--")
}

/// 验证文件内容的魔术字节是否与扩展名匹配，未知扩展名一律拒绝
pub fn validate_magic_bytes(head: &[u8], extension: &str) -> bool {
    !head.is_empty() && MediaKind::from_extension(extension).is_some_and(|kind| kind.matches(head))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_and_pdf_magic() {
        assert!(validate_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0], ".jpeg"));
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".gif"));
    }

    #[test]
    fn test_svg_detection() {
        assert!(validate_magic_bytes(b"  <svg xmlns=\"http://www.w3.org/2000/svg\">", ".svg"));
        assert!(validate_magic_bytes(b"\xEF\xBB\xBF<?xml version=\"1.0\"?>", ".svg"));
        assert!(!validate_magic_bytes(b"GIF89a", ".svg"));
    }

    #[test]
    fn test_rejects_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(MediaKind::from_extension(".JPG").map(|k| k.mime_type()), Some("image/jpeg"));
        assert_eq!(MediaKind::Svg.mime_type(), "image/svg+xml");
    }
}
