use crate::models::SearchRequest;

/// Query sent when the client gives neither tags nor keywords: any repository
/// with at least one star.
pub const ANY_POPULAR_QUERY: &str = "stars:>0";

/// Build the upstream query string. Tags win over keywords.
pub fn build_query(req: &SearchRequest) -> String {
    if !req.tags.is_empty() {
        return req.tags.iter().collect::<Vec<_>>().join(" ");
    }

    let keywords = req.keywords.trim();
    if keywords.is_empty() {
        ANY_POPULAR_QUERY.to_string()
    } else {
        keywords.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FetchMode, TagSet};

    fn request(keywords: &str, tags: &str) -> SearchRequest {
        SearchRequest {
            keywords: keywords.to_string(),
            tags: TagSet::parse(tags),
            mode: FetchMode::SinglePage { page: 1 },
        }
    }

    #[test]
    fn test_tags_joined_with_spaces_in_order() {
        assert_eq!(build_query(&request("", "rust, cli ,tui")), "rust cli tui");
    }

    #[test]
    fn test_tags_take_precedence_over_keywords() {
        assert_eq!(build_query(&request("python", "rust")), "rust");
    }

    #[test]
    fn test_duplicate_tag_after_trim_appears_once() {
        assert_eq!(build_query(&request("", "cli,cli ")), "cli");
    }

    #[test]
    fn test_whitespace_inside_tags_does_not_change_query() {
        let a = build_query(&request("", "web  framework, async"));
        let b = build_query(&request("", " web framework ,async "));
        assert_eq!(a, b);
        assert_eq!(a, "web framework async");
    }

    #[test]
    fn test_blank_tags_fall_back_to_keywords() {
        assert_eq!(build_query(&request("  tokio  ", " , ,")), "tokio");
    }

    #[test]
    fn test_empty_request_uses_popularity_sentinel() {
        assert_eq!(build_query(&request("", "")), ANY_POPULAR_QUERY);
        assert_eq!(build_query(&request("   ", "")), ANY_POPULAR_QUERY);
    }

    #[test]
    fn test_keywords_are_passed_verbatim() {
        assert_eq!(
            build_query(&request(" language:rust stars:>100 ", "")),
            "language:rust stars:>100"
        );
    }
}
