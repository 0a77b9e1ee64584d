pub mod cases;
pub mod denials;
pub mod evaluate;
pub mod guidelines;
pub mod health;
pub mod letters;
pub mod patients;

/// Today's date in the server's time zone.
pub(crate) fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}
