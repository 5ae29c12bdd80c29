//! Database queries for tours, bookings, coupons, locations, and reviews
//!
//! Postgres stands in for the hosted backend the site delegates persistence
//! to. Booking creation goes through the store's `book_tour_atomic_by_date`
//! function so the slot check and insert happen in one transaction.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    Booking, ContactMessage, Coupon, Location, NewBooking, NewContactMessage, NewReview, Review,
    Tour,
};

/// List active tours, newest first
pub async fn list_active_tours(pool: &PgPool) -> Result<Vec<Tour>> {
    let tours = sqlx::query_as::<_, Tour>(
        r#"
        SELECT
            id, title, short_title, description, long_description,
            price, duration, max_guests, rating, review_count,
            images, highlights, included, not_included, itinerary,
            pickup_restrictions, fixed_pickup_location, pickup_areas,
            booking_notes, is_active, created_at, updated_at
        FROM tours
        WHERE is_active = true
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tours)
}

/// Get an active tour by id
pub async fn get_tour(pool: &PgPool, id: Uuid) -> Result<Tour> {
    let tour = sqlx::query_as::<_, Tour>(
        r#"
        SELECT
            id, title, short_title, description, long_description,
            price, duration, max_guests, rating, review_count,
            images, highlights, included, not_included, itinerary,
            pickup_restrictions, fixed_pickup_location, pickup_areas,
            booking_notes, is_active, created_at, updated_at
        FROM tours
        WHERE id = $1
          AND is_active = true
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(tour)
}

/// Find a coupon by code, exact match but case-insensitive
pub async fn find_coupon(pool: &PgPool, code: &str) -> Result<Option<Coupon>> {
    let coupon = sqlx::query_as::<_, Coupon>(
        r#"
        SELECT id, ref AS ref_code, title, discount, times, created_at
        FROM coupons
        WHERE lower(ref) = lower($1)
        "#,
    )
    .bind(code.trim())
    .fetch_optional(pool)
    .await?;

    Ok(coupon)
}

/// Create a booking through the store's atomic insert.
///
/// `book_tour_atomic_by_date` verifies the tour/date/time slot is still
/// available and inserts in the same transaction, generating the
/// booking_number. Status fields start as pending.
pub async fn create_booking_atomic(pool: &PgPool, new: &NewBooking) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id, booking_number, tour_id, tour_date, tour_time, guests,
            total_price, pickup_location, pickup_lat, pickup_lng,
            customer_name, customer_email, customer_phone, special_requests,
            status, payment_status, coupon_ref, coupon_counted,
            created_at, updated_at
        FROM book_tour_atomic_by_date(
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15
        )
        "#,
    )
    .bind(new.tour_id)
    .bind(new.tour_date)
    .bind(new.tour_time)
    .bind(new.guests)
    .bind(new.total_price)
    .bind(&new.pickup_location)
    .bind(new.pickup_lat)
    .bind(new.pickup_lng)
    .bind(&new.customer_name)
    .bind(&new.customer_email)
    .bind(&new.customer_phone)
    .bind(&new.special_requests)
    .bind("pending")
    .bind("pending")
    .bind(&new.coupon_ref)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

/// Get a booking by its human-facing reference
pub async fn get_booking_by_number(pool: &PgPool, booking_number: &str) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id, booking_number, tour_id, tour_date, tour_time, guests,
            total_price, pickup_location, pickup_lat, pickup_lng,
            customer_name, customer_email, customer_phone, special_requests,
            status, payment_status, coupon_ref, coupon_counted,
            created_at, updated_at
        FROM bookings
        WHERE booking_number = $1
        "#,
    )
    .bind(booking_number)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(booking)
}

/// Count a coupon use for a booking, exactly once.
///
/// Increments the coupon usage counter and flags the booking as counted in
/// a single transaction. Returns false when there is nothing to count (no
/// coupon on the booking, or already counted), so confirmation-page
/// refreshes are idempotent.
pub async fn mark_coupon_counted(pool: &PgPool, booking_number: &str) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id, booking_number, tour_id, tour_date, tour_time, guests,
            total_price, pickup_location, pickup_lat, pickup_lng,
            customer_name, customer_email, customer_phone, special_requests,
            status, payment_status, coupon_ref, coupon_counted,
            created_at, updated_at
        FROM bookings
        WHERE booking_number = $1
        FOR UPDATE
        "#,
    )
    .bind(booking_number)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound)?;

    let Some(coupon_ref) = booking.coupon_ref.as_deref() else {
        return Ok(false);
    };
    if booking.coupon_counted {
        return Ok(false);
    }

    sqlx::query(
        r#"
        UPDATE coupons
        SET times = times + 1
        WHERE lower(ref) = lower($1)
        "#,
    )
    .bind(coupon_ref.trim())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE bookings
        SET coupon_counted = true, updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(booking.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(true)
}

/// Search active pickup locations by address substring and optional areas
pub async fn search_locations(
    pool: &PgPool,
    query: &str,
    areas: &[String],
) -> Result<Vec<Location>> {
    let pattern = format!("%{}%", query);
    let locations = sqlx::query_as::<_, Location>(
        r#"
        SELECT id, name, address, lat, lng, type AS location_type,
               area, is_active, created_at
        FROM locations
        WHERE is_active = true
          AND address ILIKE $1
          AND (cardinality($2::text[]) = 0 OR area = ANY($2))
        ORDER BY name
        LIMIT 10
        "#,
    )
    .bind(pattern)
    .bind(areas)
    .fetch_all(pool)
    .await?;

    Ok(locations)
}

/// Insert a contact form message with status 'new'
pub async fn insert_contact_message(
    pool: &PgPool,
    new: &NewContactMessage,
) -> Result<ContactMessage> {
    let message = sqlx::query_as::<_, ContactMessage>(
        r#"
        INSERT INTO contact_messages
            (first_name, last_name, email, whatsapp, tour_interest, message, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'new')
        RETURNING id, first_name, last_name, email, whatsapp, tour_interest,
                  message, status, created_at
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(&new.whatsapp)
    .bind(&new.tour_interest)
    .bind(&new.message)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Insert a review tied to an existing booking
pub async fn insert_review(pool: &PgPool, new: &NewReview) -> Result<Review> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (booking_id, tour_id, rating, title, review_text)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, booking_id, tour_id, rating, title, review_text,
                  is_featured, created_at
        "#,
    )
    .bind(new.booking_id)
    .bind(new.tour_id)
    .bind(new.rating)
    .bind(&new.title)
    .bind(&new.review_text)
    .fetch_one(pool)
    .await?;

    Ok(review)
}

/// List reviews for a tour, newest first
pub async fn list_tour_reviews(pool: &PgPool, tour_id: Uuid) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT id, booking_id, tour_id, rating, title, review_text,
               is_featured, created_at
        FROM reviews
        WHERE tour_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(tour_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}
