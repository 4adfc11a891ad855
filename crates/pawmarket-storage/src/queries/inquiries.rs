// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inquiry operations. Inquiries are insert-only.

use pawmarket_core::{Inquiry, PawmarketError};
use rusqlite::params;

use crate::database::Database;

/// Insert a new inquiry.
pub async fn insert_inquiry(db: &Database, inquiry: &Inquiry) -> Result<(), PawmarketError> {
    let inquiry = inquiry.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO inquiries (id, dog_id, name, email, phone, message, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    inquiry.id,
                    inquiry.dog_id,
                    inquiry.name,
                    inquiry.email,
                    inquiry.phone,
                    inquiry.message,
                    inquiry.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All inquiries, newest first.
pub async fn list_inquiries(db: &Database) -> Result<Vec<Inquiry>, PawmarketError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, dog_id, name, email, phone, message, created_at
                 FROM inquiries ORDER BY created_at DESC, rowid DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Inquiry {
                    id: row.get(0)?,
                    dog_id: row.get(1)?,
                    name: row.get(2)?,
                    email: row.get(3)?,
                    phone: row.get(4)?,
                    message: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut inquiries = Vec::new();
            for row in rows {
                inquiries.push(row?);
            }
            Ok(inquiries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
