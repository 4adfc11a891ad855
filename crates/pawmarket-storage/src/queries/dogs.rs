// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dog listing CRUD operations.

use pawmarket_core::{Dog, DogFields, PawmarketError};
use rusqlite::params;
use rusqlite::types::Type;

use crate::database::Database;

const DOG_COLUMNS: &str = "id, breed, age, gender, price, availability, description, location, \
                           image_data, created_at, updated_at";

/// Parse an enum stored as TEXT, reporting the column on failure.
fn parse_text_enum<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_dog(row: &rusqlite::Row<'_>) -> rusqlite::Result<Dog> {
    Ok(Dog {
        id: row.get(0)?,
        breed: row.get(1)?,
        age: row.get(2)?,
        gender: parse_text_enum(row, 3)?,
        price: row.get(4)?,
        availability: parse_text_enum(row, 5)?,
        description: row.get(6)?,
        location: row.get(7)?,
        image: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

/// Insert a fully-formed listing.
pub async fn insert_dog(db: &Database, dog: &Dog) -> Result<(), PawmarketError> {
    let dog = dog.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO dogs (id, breed, age, gender, price, availability, description,
                                   location, image_data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    dog.id,
                    dog.breed,
                    dog.age,
                    dog.gender.to_string(),
                    dog.price,
                    dog.availability.to_string(),
                    dog.description,
                    dog.location,
                    dog.image,
                    dog.created_at,
                    dog.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All listings, newest first. Rows created in the same instant keep
/// insertion order (newest first).
pub async fn list_dogs(db: &Database) -> Result<Vec<Dog>, PawmarketError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DOG_COLUMNS} FROM dogs ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt.query_map([], row_to_dog)?;
            let mut dogs = Vec::new();
            for row in rows {
                dogs.push(row?);
            }
            Ok(dogs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a listing by ID.
pub async fn get_dog(db: &Database, id: &str) -> Result<Option<Dog>, PawmarketError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!("SELECT {DOG_COLUMNS} FROM dogs WHERE id = ?1"))?;
            match stmt.query_row(params![id], row_to_dog) {
                Ok(dog) => Ok(Some(dog)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite every mutable field of a listing, and the image only when
/// `new_image` is `Some`. Returns the number of rows changed (0 or 1).
pub async fn update_dog(
    db: &Database,
    id: &str,
    fields: DogFields,
    new_image: Option<String>,
    updated_at: String,
) -> Result<usize, PawmarketError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE dogs
                 SET breed = ?1, age = ?2, gender = ?3, price = ?4, availability = ?5,
                     description = ?6, location = ?7,
                     image_data = COALESCE(?8, image_data), updated_at = ?9
                 WHERE id = ?10",
                params![
                    fields.breed,
                    fields.age,
                    fields.gender.to_string(),
                    fields.price,
                    fields.availability.to_string(),
                    fields.description,
                    fields.location,
                    new_image,
                    updated_at,
                    id,
                ],
            )?;
            Ok(changed)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a listing. Returns the number of rows removed (0 or 1).
pub async fn delete_dog(db: &Database, id: &str) -> Result<usize, PawmarketError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute("DELETE FROM dogs WHERE id = ?1", params![id])?;
            Ok(removed)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
