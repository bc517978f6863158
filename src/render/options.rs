//! Page selection shared by the rendering and visualization steps.

use std::ops::RangeInclusive;

/// Page selection (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Specific pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// A single page.
    pub fn single(page: u32) -> Self {
        PageSelection::Pages(vec![page])
    }

    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Selected page numbers for a document with `count` pages, ascending.
    pub fn resolve(&self, count: u32) -> Vec<u32> {
        (1..=count).filter(|page| self.includes(*page)).collect()
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_page(start, "Invalid start page")?;
                let end = parse_page(end, "Invalid end page")?;
                if start > end {
                    return Err(format!("Empty page range: {}", s));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page(start, "Invalid page number")?;
                let end = parse_page(end, "Invalid page number")?;
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part, "Invalid page number")?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

/// Parse a 1-indexed page number.
fn parse_page(s: &str, message: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("Page numbers start at 1".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("{}: {:?}", message, s.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_selection_includes() {
        let all = PageSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3, 5, 7]);
        assert!(pages.includes(1));
        assert!(!pages.includes(2));
        assert!(pages.includes(3));
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("1-10").unwrap(),
            PageSelection::Range(1..=10)
        );
        assert_eq!(
            PageSelection::parse("1,3,5-7,10,3").unwrap(),
            PageSelection::Pages(vec![1, 3, 5, 6, 7, 10])
        );
    }

    #[test]
    fn test_page_selection_parse_errors() {
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("5-2").is_err());
        assert!(PageSelection::parse("x").is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(PageSelection::All.resolve(3), vec![1, 2, 3]);
        assert_eq!(PageSelection::single(2).resolve(3), vec![2]);
        assert_eq!(PageSelection::Range(2..=9).resolve(3), vec![2, 3]);
        assert!(PageSelection::single(1).resolve(0).is_empty());
    }
}
