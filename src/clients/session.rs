use std::collections::BTreeMap;

// Tracking values the web app always sends, whatever the server set.
const COMPANION_COOKIES: [(&str, &str); 4] = [
    ("sg_user_id", "null"),
    ("ajs_group_id", "null"),
    (
        "ajs_anonymous_id",
        "%22ab91b9bf-a89e-4aa2-8ab2-bebaf5790d23%22",
    ),
    ("_ga", "GA1.2.705052639.1521047187"),
];

/// An authenticated taste.io session. Created by a login and sent along with
/// every ratings request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cookies: BTreeMap<String, String>,
}

impl Session {
    /// Builds the session from the `Set-Cookie` values and the token of a
    /// successful login response.
    pub fn from_login<'a>(set_cookies: impl IntoIterator<Item = &'a str>, token: &str) -> Self {
        let mut cookies: BTreeMap<String, String> = set_cookies
            .into_iter()
            .filter_map(Session::parse_set_cookie)
            .collect();

        cookies.insert("token".to_string(), token.to_string());
        for (name, value) in COMPANION_COOKIES {
            cookies.insert(name.to_string(), value.to_string());
        }

        Session { cookies }
    }

    #[cfg(test)]
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|v| v.as_str())
    }

    /// Value for the `Cookie` request header, ordered by cookie name.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    // "connect.sid=s%3Aabc; Path=/; HttpOnly" -> ("connect.sid", "s%3Aabc")
    fn parse_set_cookie(header: &str) -> Option<(String, String)> {
        let pair = header.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_cookie_pairs_and_drops_attributes() {
        let session = Session::from_login(
            vec![
                "__cfduid=d41d8cd98f00b204; expires=Thu, 14-Mar-19 17:06:27 GMT; path=/; domain=.taste.io; HttpOnly",
                "connect.sid=s%3AJ0sRk.abc; Path=/; Expires=Wed, 14 Mar 2018 18:06:27 GMT; HttpOnly",
            ],
            "eyJhbGciOi",
        );

        assert_eq!(session.cookie("__cfduid"), Some("d41d8cd98f00b204"));
        assert_eq!(session.cookie("connect.sid"), Some("s%3AJ0sRk.abc"));
        assert_eq!(session.cookie("path"), None);
        assert_eq!(session.cookie("token"), Some("eyJhbGciOi"));
    }

    #[test]
    fn cookie_header_is_sorted_and_carries_token_and_companions() {
        let session = Session::from_login(vec!["connect.sid=abc; Path=/"], "tok");

        assert_eq!(
            session.cookie_header(),
            "_ga=GA1.2.705052639.1521047187; \
             ajs_anonymous_id=%22ab91b9bf-a89e-4aa2-8ab2-bebaf5790d23%22; \
             ajs_group_id=null; \
             connect.sid=abc; \
             sg_user_id=null; \
             token=tok"
        );
    }

    #[test]
    fn works_without_any_set_cookie() {
        let session = Session::from_login(Vec::<&str>::new(), "tok");

        assert_eq!(session.cookie("token"), Some("tok"));
        assert_eq!(session.cookie_header().split("; ").count(), 5);
    }

    #[test]
    fn ignores_garbage_set_cookie_values() {
        let session = Session::from_login(vec!["", "=orphan", "novalue"], "tok");

        assert_eq!(session.cookie_header().split("; ").count(), 5);
    }
}
