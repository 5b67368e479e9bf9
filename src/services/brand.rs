//! Brand service
//!
//! Business logic for brand management. Every mutation writes the brand
//! change and exactly one audit record in a single unit of work.

use tracing::{debug, info};

use crate::audit::AuditDraft;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{
    AllowAllTransitions, AuditContext, Brand, BrandId, BrandPatch, BrandStatus, NewBrand,
    TransitionPolicy,
};
use crate::storage::{Storage, UnitOfWork};

/// Service for brand management
pub struct BrandService<'a> {
    storage: &'a Storage,
    policy: &'a dyn TransitionPolicy,
}

impl<'a> BrandService<'a> {
    /// Create a new brand service that allows every status transition
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            policy: &AllowAllTransitions,
        }
    }

    /// Use a custom status transition policy
    pub fn with_policy(mut self, policy: &'a dyn TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create a new brand
    pub fn create(&self, new: NewBrand, ctx: &AuditContext) -> RegistryResult<Brand> {
        validate_context(ctx)?;

        let mut uow = self.storage.begin()?;
        let brand = uow.insert_brand(new)?;

        brand
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;
        check_registration_number(&uow, &brand)?;

        uow.append_audit(AuditDraft::created(&brand, ctx))?;
        uow.commit()?;

        info!(brand_id = %brand.id, name = %brand.name, user = %ctx.actor.user_id, "brand created");
        Ok(brand)
    }

    /// Apply the supplied fields of a patch to a brand
    pub fn update(&self, id: BrandId, patch: BrandPatch, ctx: &AuditContext) -> RegistryResult<Brand> {
        validate_context(ctx)?;

        let mut uow = self.storage.begin()?;
        let before = uow
            .brand(id)
            .cloned()
            .ok_or_else(|| RegistryError::brand_not_found(id.to_string()))?;

        let mut after = before.clone();
        after.apply(&patch);
        after
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        if let Some(status) = patch.status {
            self.check_transition(before.status, status)?;
        }

        if after.registration_number != before.registration_number {
            check_registration_number(&uow, &after)?;
        }

        uow.put_brand(after.clone())?;
        let record = uow.append_audit(AuditDraft::updated(&before, &after, ctx))?;
        uow.commit()?;

        info!(
            brand_id = %id,
            user = %ctx.actor.user_id,
            summary = record.summary.as_deref().unwrap_or_default(),
            "brand updated"
        );
        Ok(after)
    }

    /// Move a brand to a new status
    pub fn set_status(
        &self,
        id: BrandId,
        status: BrandStatus,
        ctx: &AuditContext,
    ) -> RegistryResult<Brand> {
        validate_context(ctx)?;

        let mut uow = self.storage.begin()?;
        let mut brand = uow
            .brand(id)
            .cloned()
            .ok_or_else(|| RegistryError::brand_not_found(id.to_string()))?;

        let from = brand.status;
        self.check_transition(from, status)?;
        brand.status = status;

        uow.put_brand(brand.clone())?;
        uow.append_audit(AuditDraft::status_changed(&brand, from, status, ctx))?;
        uow.commit()?;

        info!(brand_id = %id, %from, to = %status, user = %ctx.actor.user_id, "brand status changed");
        Ok(brand)
    }

    /// Delete a brand; its audit history is kept
    pub fn delete(&self, id: BrandId, ctx: &AuditContext) -> RegistryResult<Brand> {
        validate_context(ctx)?;

        let mut uow = self.storage.begin()?;
        let brand = uow.remove_brand(id)?;
        uow.append_audit(AuditDraft::deleted(&brand, ctx))?;
        uow.commit()?;

        info!(brand_id = %id, name = %brand.name, user = %ctx.actor.user_id, "brand deleted");
        Ok(brand)
    }

    /// Get a brand by ID
    pub fn get(&self, id: BrandId) -> RegistryResult<Brand> {
        self.find(id)?
            .ok_or_else(|| RegistryError::brand_not_found(id.to_string()))
    }

    /// Get a brand by ID, if it exists
    pub fn find(&self, id: BrandId) -> RegistryResult<Option<Brand>> {
        self.storage.brands.get(id)
    }

    /// Find a brand by ID string or exact name (case-insensitive)
    pub fn resolve(&self, identifier: &str) -> RegistryResult<Brand> {
        if let Ok(id) = identifier.parse::<BrandId>() {
            if let Some(brand) = self.find(id)? {
                return Ok(brand);
            }
        }

        let name_lower = identifier.trim().to_lowercase();
        self.storage
            .brands
            .get_all()?
            .into_iter()
            .find(|b| b.name.to_lowercase() == name_lower)
            .ok_or_else(|| RegistryError::brand_not_found(identifier))
    }

    /// Page through all brands in id order
    pub fn list(&self, skip: usize, limit: Option<usize>) -> RegistryResult<Vec<Brand>> {
        let brands = self.storage.brands.get_all()?;
        Ok(brands
            .into_iter()
            .skip(skip)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    /// Brands with the given status
    pub fn by_status(&self, status: BrandStatus) -> RegistryResult<Vec<Brand>> {
        self.storage.brands.get_by_status(status)
    }

    /// Brands owned by exactly this owner
    pub fn by_owner(&self, owner: &str) -> RegistryResult<Vec<Brand>> {
        self.storage.brands.get_by_owner(owner.trim())
    }

    /// Brands whose name contains `query` (case-insensitive)
    pub fn search_by_name(&self, query: &str) -> RegistryResult<Vec<Brand>> {
        if query.trim().is_empty() {
            return Err(RegistryError::Validation(
                "Search text cannot be empty".into(),
            ));
        }

        debug!(query, "searching brands by name");
        self.storage.brands.search_by_name(query)
    }

    /// Brands currently registered
    pub fn active(&self) -> RegistryResult<Vec<Brand>> {
        self.by_status(BrandStatus::Registered)
    }

    /// Count brands
    pub fn count(&self) -> RegistryResult<usize> {
        self.storage.brands.count()
    }

    fn check_transition(&self, from: BrandStatus, to: BrandStatus) -> RegistryResult<()> {
        if self.policy.allowed(from, to) {
            Ok(())
        } else {
            Err(RegistryError::Validation(format!(
                "Status transition from {} to {} is not allowed",
                from, to
            )))
        }
    }
}

fn validate_context(ctx: &AuditContext) -> RegistryResult<()> {
    if ctx.actor.email.trim().is_empty() {
        return Err(RegistryError::Validation(
            "Acting user email cannot be empty".into(),
        ));
    }
    Ok(())
}

fn check_registration_number(uow: &UnitOfWork<'_>, brand: &Brand) -> RegistryResult<()> {
    match &brand.registration_number {
        Some(number) if uow.registration_number_taken(number, Some(brand.id)) => {
            Err(RegistryError::registration_number_taken(number.clone()))
        }
        _ => Ok(()),
    }
}
