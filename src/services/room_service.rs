// src/services/room_service.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{RoomRepository, SaleRepository},
    models::{
        auth::User,
        room::{Room, RoomStatus},
        sale::{Sale, SaleStatus, SaleType},
    },
};

// A máquina de estados quarto/venda. Toda transição roda numa única
// transação: o status do quarto e o status da venda nunca divergem.
#[derive(Clone)]
pub struct RoomService {
    room_repo: RoomRepository,
    sale_repo: SaleRepository,
    pool: SqlitePool,
}

impl RoomService {
    pub fn new(room_repo: RoomRepository, sale_repo: SaleRepository, pool: SqlitePool) -> Self {
        Self {
            room_repo,
            sale_repo,
            pool,
        }
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        self.room_repo.list_all().await
    }

    pub async fn add_room(
        &self,
        room_number: i64,
        price_full: i64,
        price_passage: i64,
    ) -> Result<Room, AppError> {
        self.room_repo
            .create(&self.pool, room_number, price_full, price_passage)
            .await
    }

    pub async fn delete_room(&self, room_id: i64) -> Result<(), AppError> {
        let room = self
            .room_repo
            .find_by_id(room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;

        if room.status == RoomStatus::Sold {
            return Err(AppError::RoomIsSold);
        }

        // O DELETE re-testa a disponibilidade; 0 linhas = vendeu no meio tempo.
        let deleted = self.room_repo.delete_if_available(&self.pool, room_id).await?;
        if deleted == 0 {
            return Err(AppError::RoomIsSold);
        }
        Ok(())
    }

    // --- VENDER ---
    // Pré-condição (quarto existe e está disponível) e efeito são um único
    // UPDATE condicional; a venda é gravada na mesma transação com o preço
    // congelado da tarifa escolhida.
    pub async fn sell_room(
        &self,
        actor: &User,
        room_number: i64,
        sale_type: SaleType,
    ) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let room = self
            .room_repo
            .mark_sold_if_available(&mut *tx, room_number)
            .await?
            .ok_or(AppError::RoomNotAvailable(room_number))?;

        let price = match sale_type {
            SaleType::Full => room.price_full,
            SaleType::Passage => room.price_passage,
        };

        let today = Utc::now().date_naive();
        let sale = self
            .sale_repo
            .create(&mut *tx, room.room_id, actor.id, today, price, sale_type)
            .await?;

        tx.commit().await?;
        Ok(sale)
    }

    // --- RESTAURAR ---
    // Apenas o gestionnaire que vendeu pode restaurar; o filtro de dono
    // fica dentro do UPDATE condicional da venda.
    pub async fn restore_room(&self, actor: &User, room_number: i64) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let room = self
            .room_repo
            .find_by_number(&mut *tx, room_number)
            .await?
            .ok_or(AppError::NoActiveSaleForActor(room_number))?;

        if room.status != RoomStatus::Sold {
            return Err(AppError::NoActiveSaleForActor(room_number));
        }

        let today = Utc::now().date_naive();
        let sale = self
            .sale_repo
            .restore_active_for(&mut *tx, room.room_id, actor.id, today)
            .await?
            .ok_or(AppError::NoActiveSaleForActor(room_number))?;

        self.room_repo
            .set_status(&mut *tx, room.room_id, RoomStatus::Available)
            .await?;

        tx.commit().await?;
        Ok(sale)
    }

    // --- EXCLUIR RELATÓRIO DE VENDA (admin) ---
    // O quarto só volta para 'available' quando a venda excluída é a venda
    // ativa. Excluir uma venda já restaurada não toca o quarto: se ele foi
    // revendido depois, a venda ativa do outro gestionnaire continua íntegra.
    pub async fn delete_sale_report(&self, sale_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = self
            .sale_repo
            .find_by_id(&mut *tx, sale_id)
            .await?
            .ok_or(AppError::SaleNotFound)?;

        if sale.status == SaleStatus::Active {
            self.room_repo
                .set_status(&mut *tx, sale.room_id, RoomStatus::Available)
                .await?;
        }

        self.sale_repo.delete(&mut *tx, sale_id).await?;

        tx.commit().await?;
        Ok(())
    }
}
