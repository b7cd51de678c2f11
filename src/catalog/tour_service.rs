//! Tour queries and mutations over the catalog store.

use crate::catalog_store::{Artist, Database, Filter, SortKey, StoreError, Tour, TourInclude};
use std::sync::Arc;

pub struct TourService {
    database: Arc<Database>,
}

impl TourService {
    pub fn new(database: Arc<Database>) -> Self {
        TourService { database }
    }

    /// Create a new tour. Copies the allowed fields from the input, ignoring
    /// any client-supplied id, and returns the entity with its assigned id.
    pub fn create_tour(&self, tour: Tour) -> Result<Tour, StoreError> {
        let mut unit = self.database.unit_of_work();
        let staged = unit.tours.add(Tour {
            id: 0,
            name: tour.name,
            city: tour.city,
            date: tour.date,
            is_sold: tour.is_sold,
            artist_id: tour.artist_id,
            artist: None,
        });
        unit.save()?;
        unit.tours.created(staged)
    }

    /// All tours. With `references_loaded` the artist navigation is fetched
    /// in the same query and results are ordered by id; without it the plain
    /// set comes back in store order.
    pub fn get_tours(&self, references_loaded: bool) -> Result<Vec<Tour>, StoreError> {
        let unit = self.database.unit_of_work();
        if references_loaded {
            unit.tours
                .get_all(None, Some(SortKey::IdAscending), Some(TourInclude::Artist))
        } else {
            unit.tours.get_all(None, None, None)
        }
    }

    /// Tours held in this city.
    pub fn get_tours_by_city(&self, city: &str) -> Result<Vec<Tour>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.tours.get_all(
            Some(Filter::Eq(Tour::CITY, city.into())),
            Some(SortKey::IdAscending),
            Some(TourInclude::Artist),
        )
    }

    /// Tours held on this date, compared per row against the `YYYY-MM-DD`
    /// date field.
    pub fn get_tours_by_date(&self, date: &str) -> Result<Vec<Tour>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.tours.get_all(
            Some(Filter::Eq(Tour::DATE, date.into())),
            Some(SortKey::IdAscending),
            Some(TourInclude::Artist),
        )
    }

    /// Tours filtered by their sold-out flag.
    pub fn get_tours_by_sold(&self, is_sold: bool) -> Result<Vec<Tour>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.tours.get_all(
            Some(Filter::Eq(Tour::IS_SOLD, is_sold.into())),
            Some(SortKey::IdAscending),
            Some(TourInclude::Artist),
        )
    }

    /// Tours held by the artist with this name.
    pub fn get_tours_by_artist(&self, artist: &str) -> Result<Vec<Tour>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.tours.get_all(
            Some(Filter::ParentEq(Artist::NAME, artist.into())),
            Some(SortKey::IdAscending),
            Some(TourInclude::Artist),
        )
    }

    pub fn get_tour_by_id(&self, id: i64) -> Result<Option<Tour>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.tours.find(id)
    }

    /// Full-row replace keyed by the tour's id. Returns the input entity;
    /// callers wanting server-computed state should re-fetch.
    pub fn update_tour(&self, tour: Tour) -> Result<Tour, StoreError> {
        let mut unit = self.database.unit_of_work();
        unit.tours.update(tour.clone());
        unit.save()?;
        Ok(tour)
    }
}
