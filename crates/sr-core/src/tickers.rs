//! `$TICKER` mentions in post bodies.

/// Returns every `$` followed by one or more ASCII uppercase letters, without
/// the `$`, de-duplicated in first-occurrence order.
pub fn extract_tickers(content: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut rest = content;

    while let Some(pos) = rest.find('$') {
        let after = &rest[pos + 1..];
        let len = after
            .bytes()
            .take_while(|b| b.is_ascii_uppercase())
            .count();
        if len > 0 {
            let ticker = &after[..len];
            if !found.iter().any(|t| t == ticker) {
                found.push(ticker.to_string());
            }
        }
        rest = &after[len..];
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_in_first_occurrence_order() {
        assert_eq!(
            extract_tickers("Watch $SAMSUNG and $SAMSUNG now, also $SKHYNIX"),
            vec!["SAMSUNG", "SKHYNIX"]
        );
    }

    #[test]
    fn only_uppercase_prefix_counts() {
        assert_eq!(extract_tickers("$naver $Kakao $LG2"), vec!["K", "LG"]);
    }

    #[test]
    fn lone_dollars_are_ignored() {
        assert!(extract_tickers("costs $ 5 or $$").is_empty());
        assert_eq!(extract_tickers("$$NAVER"), vec!["NAVER"]);
    }
}
