//! Booking workflow service

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDetails, BookingListQuery, BookingStatus, CreateBooking},
        local_now,
    },
    repository::{bookings::BookingParty, Repository},
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Book someone else's available item; the booking starts out WAITING
    pub async fn create(&self, booker_id: i64, booking: CreateBooking) -> AppResult<BookingDetails> {
        self.repository.users.get_by_id(booker_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if item.owner_id == booker_id {
            return Err(AppError::WrongOwner(format!(
                "Owner cannot book their own item {}",
                item.id
            )));
        }
        if !item.available {
            return Err(AppError::BadRequest(format!("Item {} is not available", item.id)));
        }
        let (start, end) = booking.period(local_now())?;

        let created = self
            .repository
            .bookings
            .create(booker_id, item.id, start, end)
            .await?;
        tracing::info!(
            "Created booking id={} of item id={} by user id={}",
            created.id,
            item.id,
            booker_id
        );
        Ok(created)
    }

    /// Approve or reject a waiting booking on behalf of the item owner
    pub async fn approve(
        &self,
        user_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_details(booking_id).await?;
        self.repository.users.get_by_id(user_id).await?;

        if booking.item.owner_id != user_id {
            return Err(AppError::WrongOwner(format!(
                "User {} is not the owner of item {}",
                user_id, booking.item.id
            )));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(AppError::BadRequest(format!(
                "Booking {} is already {}",
                booking_id, booking.status
            )));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = self.repository.bookings.update_status(booking_id, status).await?;
        tracing::info!("Booking id={} is now {}", booking_id, status);
        Ok(updated)
    }

    /// A booking, visible to its booker and to the item owner
    pub async fn get(&self, user_id: i64, booking_id: i64) -> AppResult<BookingDetails> {
        tracing::debug!("Get booking id={} for user id={}", booking_id, user_id);
        let booking = self.repository.bookings.get_details(booking_id).await?;

        if booking.booker.id != user_id && booking.item.owner_id != user_id {
            return Err(AppError::WrongOwner(format!(
                "User {} is neither the booker nor the item owner of booking {}",
                user_id, booking_id
            )));
        }
        Ok(booking)
    }

    /// Bookings made by the user
    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        query: &BookingListQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.list(BookingParty::Booker(booker_id), booker_id, query)
            .await
    }

    /// Bookings of the items the user owns
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        query: &BookingListQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.list(BookingParty::Owner(owner_id), owner_id, query)
            .await
    }

    /// User, then pagination, then state
    async fn list(
        &self,
        party: BookingParty,
        user_id: i64,
        query: &BookingListQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        let page = query.page_query().page()?;
        let state = query.state()?;
        tracing::debug!("List bookings for {:?} in state {:?}", party, state);

        self.repository
            .bookings
            .list(party, state.filter(local_now()), page)
            .await
    }
}
