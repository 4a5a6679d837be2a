//! Parser for catalogue data files.
//!
//! Two line-oriented, `::`-separated formats:
//! - `films.dat`: filmId::title::genres[::mpa]
//! - `ratings.dat`: filmId::userId::value
//!
//! Titles may carry a year in trailing parentheses ("Toy Story (1995)");
//! genres are pipe-separated and may be empty. Blank lines are skipped,
//! everything else must parse or the whole load fails with the offending
//! file and line number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::types::{Film, Mpa, Rating};

const FILMS_FILE: &str = "films.dat";
const RATINGS_FILE: &str = "ratings.dat";

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn parse_error(file: &str, line: usize, reason: impl Into<String>) -> CatalogError {
    CatalogError::ParseError {
        file: file.to_string(),
        line,
        reason: reason.into(),
    }
}

/// Pulls the next `::` field out of a line, or fails naming the field
fn next_field<'a>(
    parts: &mut std::str::Split<'a, &str>,
    file: &str,
    line: usize,
    name: &str,
) -> Result<&'a str> {
    parts
        .next()
        .ok_or_else(|| parse_error(file, line, format!("Missing {name}")))
}

/// Parse the films.dat file
pub fn parse_films(path: &Path) -> Result<Vec<Film>> {
    let lines = read_lines(path)?;
    let mut films = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        films.push(parse_film_line(trimmed, line_no)?);
    }

    Ok(films)
}

fn parse_film_line(line: &str, line_no: usize) -> Result<Film> {
    let mut parts = line.split("::");

    let id = next_field(&mut parts, FILMS_FILE, line_no, "filmId")?
        .parse()
        .map_err(|e| parse_error(FILMS_FILE, line_no, format!("Invalid filmId: {e}")))?;
    let title = next_field(&mut parts, FILMS_FILE, line_no, "title")?;
    let genres_field = next_field(&mut parts, FILMS_FILE, line_no, "genres")?;

    let genres = genres_field
        .split('|')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse())
        .collect::<Result<Vec<_>>>()?;

    // Trailing mpa field is optional.
    let mpa = match parts.next() {
        Some(s) if !s.is_empty() => Some(s.parse::<Mpa>()?),
        _ => None,
    };

    Ok(Film {
        id,
        title: title.to_string(),
        year: extract_year_from_title(title),
        genres,
        mpa,
    })
}

/// Parse the ratings.dat file
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let lines = read_lines(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        ratings.push(parse_rating_line(trimmed, line_no)?);
    }

    Ok(ratings)
}

fn parse_rating_line(line: &str, line_no: usize) -> Result<Rating> {
    let mut parts = line.split("::");

    let film_id = next_field(&mut parts, RATINGS_FILE, line_no, "filmId")?
        .parse()
        .map_err(|e| parse_error(RATINGS_FILE, line_no, format!("Invalid filmId: {e}")))?;
    let user_id = next_field(&mut parts, RATINGS_FILE, line_no, "userId")?
        .parse()
        .map_err(|e| parse_error(RATINGS_FILE, line_no, format!("Invalid userId: {e}")))?;
    let value = next_field(&mut parts, RATINGS_FILE, line_no, "value")?
        .parse()
        .map_err(|e| parse_error(RATINGS_FILE, line_no, format!("Invalid value: {e}")))?;

    Ok(Rating {
        film_id,
        user_id,
        value,
    })
}

/// Extract year from a film title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Film Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let rest = title.trim_end().strip_suffix(')')?;
    let (_, year) = rest.rsplit_once('(')?;
    year.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Genre;

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year_from_title("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year_from_title("Film Title"), None);
        assert_eq!(extract_year_from_title("Brazil (1985) "), Some(1985));
        assert_eq!(extract_year_from_title("Unbalanced (paren"), None);
    }

    #[test]
    fn test_parse_film_line() {
        let film = parse_film_line("3::Heat (1995)::Action|Thriller::R", 1).unwrap();
        assert_eq!(film.id, 3);
        assert_eq!(film.title, "Heat (1995)");
        assert_eq!(film.year, Some(1995));
        assert_eq!(film.genres, vec![Genre::Action, Genre::Thriller]);
        assert_eq!(film.mpa, Some(Mpa::R));
    }

    #[test]
    fn test_parse_film_line_without_mpa() {
        let film = parse_film_line("9::Quiet One::Documentary", 1).unwrap();
        assert_eq!(film.year, None);
        assert_eq!(film.mpa, None);
    }

    #[test]
    fn test_parse_film_line_empty_genres() {
        let film = parse_film_line("4::Mystery Reel::", 1).unwrap();
        assert!(film.genres.is_empty());
    }

    #[test]
    fn test_parse_film_line_reports_position() {
        let err = parse_film_line("x::Broken::Drama", 7).unwrap_err();
        match err {
            CatalogError::ParseError { file, line, .. } => {
                assert_eq!(file, "films.dat");
                assert_eq!(line, 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rating_line() {
        let rating = parse_rating_line("3::42::8", 1).unwrap();
        assert_eq!(rating.film_id, 3);
        assert_eq!(rating.user_id, 42);
        assert_eq!(rating.value, 8);
    }

    #[test]
    fn test_parse_rating_line_missing_field() {
        let err = parse_rating_line("3::42", 2).unwrap_err();
        match err {
            CatalogError::ParseError { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("value"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
