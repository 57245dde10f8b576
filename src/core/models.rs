use serde::{Deserialize, Serialize};

/// One catalog row.
///
/// `id` is zero until the record store assigns one. `date` is kept as the
/// `DD.MM.YYYY` text the lookup service hands out and is never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "song", alias = "title", default)]
    pub title: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "releaseDate", alias = "date", default)]
    pub date: String,
}

impl Song {
    /// A song that only carries its natural lookup keys.
    pub fn new(title: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group: group.into(),
            ..Default::default()
        }
    }

    pub fn with_details(mut self, details: SongDetails) -> Self {
        self.text = details.text;
        self.link = details.link;
        self.date = details.release_date;
        self
    }
}

/// Canonical metadata returned by the enrichment service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetails {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub release_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let song = Song {
            id: 1,
            title: "TestSong".to_string(),
            group: "TestGroup".to_string(),
            text: "TestText\n\nTestText".to_string(),
            link: "TestLink".to_string(),
            date: "16.07.2006".to_string(),
        };

        let json = serde_json::to_string(&song).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"song":"TestSong","group":"TestGroup","text":"TestText\n\nTestText","link":"TestLink","releaseDate":"16.07.2006"}"#
        );
    }

    #[test]
    fn test_accepts_title_alias_and_partial_body() {
        let song: Song = serde_json::from_str(r#"{"title":"Supermassive Black Hole","group":"Muse"}"#).unwrap();
        assert_eq!(song, Song::new("Supermassive Black Hole", "Muse"));
    }

    #[test]
    fn test_with_details() {
        let details = SongDetails {
            text: "a\n\nb".to_string(),
            link: "https://example.com".to_string(),
            release_date: "01.01.2000".to_string(),
        };
        let song = Song::new("t", "g").with_details(details);
        assert_eq!(song.text, "a\n\nb");
        assert_eq!(song.date, "01.01.2000");
        assert_eq!(song.id, 0);
    }
}
