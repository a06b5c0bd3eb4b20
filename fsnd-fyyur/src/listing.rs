//! Shaping query results for the listing pages
//!
//! A show is upcoming when it starts strictly after `now`; everything else
//! is past. Both the venue list counts and the detail pages use this rule.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ArtistShow, VenueAreaRow, VenueShow};

/// True when a show starting at `start_time` has not started by `now`
pub fn is_upcoming(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time > now
}

/// Anything with a start time
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

/// Shows split around `now`, with the counts the detail pages display
#[derive(Debug, Clone, Serialize)]
pub struct ShowSplit<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Partition shows into past and upcoming, keeping their input order
pub fn split_shows<T: Scheduled>(shows: Vec<T>, now: NaiveDateTime) -> ShowSplit<T> {
    let (upcoming_shows, past_shows): (Vec<T>, Vec<T>) = shows
        .into_iter()
        .partition(|show| is_upcoming(show.start_time(), now));

    ShowSplit {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Venue entry of an area on the venues page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues of one city/state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

/// Group venue/show rows into areas
///
/// Areas are ordered by state then city, venues by name ignoring case. A venue appears
/// once however many show rows it has; venues without shows count zero.
pub fn group_by_area(rows: Vec<VenueAreaRow>, now: NaiveDateTime) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), BTreeMap<i64, AreaVenue>> = BTreeMap::new();

    for row in rows {
        let venues = areas
            .entry((row.state.clone(), row.city.clone()))
            .or_default();
        let venue = venues.entry(row.id).or_insert_with(|| AreaVenue {
            id: row.id,
            name: row.name.clone(),
            num_upcoming_shows: 0,
        });

        if row.start_time.is_some_and(|start| is_upcoming(start, now)) {
            venue.num_upcoming_shows += 1;
        }
    }

    areas
        .into_iter()
        .map(|((state, city), venues)| {
            let mut venues: Vec<AreaVenue> = venues.into_values().collect();
            venues.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then(a.id.cmp(&b.id))
            });
            Area {
                city,
                state,
                venues,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn row(id: i64, name: &str, city: &str, state: &str, start: Option<NaiveDateTime>) -> VenueAreaRow {
        VenueAreaRow {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            start_time: start,
        }
    }

    fn venue_show(start: NaiveDateTime) -> VenueShow {
        VenueShow {
            artist_id: 1,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: String::new(),
            start_time: start,
        }
    }

    #[test]
    fn test_upcoming_is_strictly_after_now() {
        let now = at(15, 12);
        assert!(is_upcoming(at(15, 13), now));
        assert!(!is_upcoming(now, now));
        assert!(!is_upcoming(at(14, 23), now));
    }

    #[test]
    fn test_split_shows_never_overlaps() {
        let now = at(15, 12);
        let shows = vec![
            venue_show(at(1, 20)),
            venue_show(at(15, 12)),
            venue_show(at(15, 18)),
            venue_show(at(30, 20)),
        ];

        let split = split_shows(shows, now);

        assert_eq!(split.past_shows_count, 2);
        assert_eq!(split.upcoming_shows_count, 2);
        assert!(split.past_shows.iter().all(|s| s.start_time <= now));
        assert!(split.upcoming_shows.iter().all(|s| s.start_time > now));
    }

    #[test]
    fn test_group_by_area_orders_and_counts() {
        let now = at(15, 12);
        let rows = vec![
            row(1, "The Musical Hop", "San Francisco", "CA", Some(at(20, 20))),
            row(1, "The Musical Hop", "San Francisco", "CA", Some(at(1, 20))),
            row(3, "Park Square Live Music & Coffee", "San Francisco", "CA", Some(at(21, 20))),
            row(2, "The Dueling Pianos Bar", "New York", "NY", None),
        ];

        let areas = group_by_area(rows, now);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].state, "CA");
        assert_eq!(areas[1].state, "NY");

        let sf = &areas[0].venues;
        assert_eq!(sf.len(), 2);
        assert_eq!(sf[0].name, "Park Square Live Music & Coffee");
        assert_eq!(sf[0].num_upcoming_shows, 1);
        assert_eq!(sf[1].name, "The Musical Hop");
        assert_eq!(sf[1].num_upcoming_shows, 1);

        assert_eq!(areas[1].venues[0].num_upcoming_shows, 0);
    }

    #[test]
    fn test_multi_word_city_stays_intact() {
        let areas = group_by_area(
            vec![row(1, "Hall", "New Orleans", "LA", None)],
            at(1, 0),
        );
        assert_eq!(areas[0].city, "New Orleans");
    }

    #[test]
    fn test_venues_sort_ignoring_case() {
        let rows = vec![
            row(1, "Zed Hall", "Austin", "TX", None),
            row(2, "apple Hall", "Austin", "TX", None),
            row(3, "Blue Hall", "Austin", "TX", None),
        ];

        let areas = group_by_area(rows, at(1, 0));
        let names: Vec<&str> = areas[0].venues.iter().map(|v| v.name.as_str()).collect();

        assert_eq!(names, vec!["apple Hall", "Blue Hall", "Zed Hall"]);
    }
}
