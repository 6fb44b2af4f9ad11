use streamify_core::error::CoreResult;
use streamify_core::registration::DeviceInfo;
use streamify_core::types::{new_id, DbId};
use streamify_db::models::device::{CreateDevice, Device, DeviceFilter, UpdateDevice};
use streamify_db::repositories::DeviceRepo;
use streamify_db::UnitOfWork;
use validator::Validate;

pub struct DeviceService;

impl DeviceService {
    pub async fn list(account_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Vec<Device>> {
        DeviceRepo::get_many(&DeviceFilter::ByAccount(account_id), uow).await
    }

    pub async fn get(account_id: DbId, device_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Device> {
        DeviceRepo::get_one(&DeviceFilter::ByAccountAndId(account_id, device_id), uow).await
    }

    pub async fn create(
        account_id: DbId,
        info: &DeviceInfo,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Device> {
        info.validate()?;
        let new = CreateDevice {
            id: new_id(),
            account_id,
            device_brand: info.device_brand.clone(),
            device_model: info.device_model.clone(),
            ip_address: info.ip_address.clone(),
        };
        DeviceRepo::create(new, uow, true).await?.into_committed()
    }

    pub async fn update(
        account_id: DbId,
        device_id: DbId,
        patch: &UpdateDevice,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Device> {
        let filter = DeviceFilter::ByAccountAndId(account_id, device_id);
        DeviceRepo::update_one(&filter, patch, uow, true).await
    }

    pub async fn delete(account_id: DbId, device_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Device> {
        let filter = DeviceFilter::ByAccountAndId(account_id, device_id);
        DeviceRepo::delete_one(&filter, uow, true).await
    }
}
