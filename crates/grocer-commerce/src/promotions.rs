//! Bulk sale pricing for the back office.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::store::{Collection, DataStore, SalePatch};
use rust_decimal::Decimal;

/// Outcome of a bulk update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionReport {
    /// Products written successfully.
    pub updated: Vec<ProductId>,
    /// Products whose update failed, with the reason.
    pub failed: Vec<(ProductId, String)>,
}

impl PromotionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A percentage off the regular price, applied to many products at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDiscount {
    percent: Decimal,
}

impl BulkDiscount {
    /// Create a discount of `percent` percent; must be above 0 and below 100.
    pub fn percent(percent: Decimal) -> Result<Self, CommerceError> {
        if percent <= Decimal::ZERO || percent >= Decimal::ONE_HUNDRED {
            return Err(CommerceError::InvalidDiscount(percent));
        }
        Ok(Self { percent })
    }

    pub fn percentage(&self) -> Decimal {
        self.percent
    }

    /// Sale price of a product: regular price less the discount.
    pub fn sale_price(&self, product: &Product) -> Result<Money, CommerceError> {
        product
            .price
            .try_multiply(Decimal::ONE - self.percent / Decimal::ONE_HUNDRED)
            .ok_or(CommerceError::Overflow)
    }

    /// Put every product on sale at its discounted price.
    ///
    /// Each product is a separate write; all are attempted.
    #[tracing::instrument(skip_all, fields(percent = %self.percent, products = products.len()))]
    pub async fn apply<D: DataStore + ?Sized>(
        &self,
        store: &D,
        products: &[Product],
    ) -> PromotionReport {
        let mut report = PromotionReport::default();
        for product in products {
            let result = match self.sale_price(product) {
                Ok(price) => {
                    write_sale(
                        store,
                        &product.id,
                        SalePatch {
                            is_on_sale: true,
                            sale_price: Some(price.to_decimal()),
                        },
                    )
                    .await
                }
                Err(e) => Err(e),
            };
            record(&mut report, &product.id, result);
        }
        report
    }
}

/// Take every product off sale.
#[tracing::instrument(skip_all, fields(products = products.len()))]
pub async fn clear_sale<D: DataStore + ?Sized>(store: &D, products: &[Product]) -> PromotionReport {
    let mut report = PromotionReport::default();
    for product in products {
        let result = write_sale(
            store,
            &product.id,
            SalePatch {
                is_on_sale: false,
                sale_price: None,
            },
        )
        .await;
        record(&mut report, &product.id, result);
    }
    report
}

async fn write_sale<D: DataStore + ?Sized>(
    store: &D,
    id: &ProductId,
    patch: SalePatch,
) -> Result<(), CommerceError> {
    let patch = serde_json::to_value(patch)?;
    store.update(Collection::Products, id.as_str(), patch).await?;
    Ok(())
}

fn record(report: &mut PromotionReport, id: &ProductId, result: Result<(), CommerceError>) {
    match result {
        Ok(()) => report.updated.push(id.clone()),
        Err(e) => {
            tracing::warn!(product_id = %id, error = %e, "sale price not updated");
            report.failed.push((id.clone(), e.to_string()));
        }
    }
}
