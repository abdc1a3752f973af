//! Repositories for storing data in the database

pub mod reservation;
pub mod reservation_memory;
pub mod reservation_sql;

pub use reservation::ReservationRepository;
pub use reservation_memory::MemoryReservationRepository;
pub use reservation_sql::SqlReservationRepository;

#[cfg(test)]
mod reservation_test;
