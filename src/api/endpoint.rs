pub type Endpoint = str;

pub const LOGIN: &Endpoint = "/login";
pub const PLANT_LIST: &Endpoint = "/index/getPlantListTitle";
pub const PLANT_DATA: &Endpoint = "/panel/getPlantData";
pub const DEVICES_BY_PLANT: &Endpoint = "/panel/getDevicesByPlant";
pub const DEVICES_BY_PLANT_LIST: &Endpoint = "/panel/getDevicesByPlantList";
pub const MIX_TOTAL_DATA: &Endpoint = "/panel/mix/getMIXTotalData";
pub const MIX_STATUS_DATA: &Endpoint = "/panel/mix/getMIXStatusData";
pub const MIX_ENERGY_DAY_CHART: &Endpoint = "/panel/mix/getMIXEnergyDayChart";
pub const MIX_ENERGY_MONTH_CHART: &Endpoint = "/panel/mix/getMIXEnergyMonthChart";
pub const MIX_ENERGY_YEAR_CHART: &Endpoint = "/panel/mix/getMIXEnergyYearChart";
pub const MIX_ENERGY_TOTAL_CHART: &Endpoint = "/panel/mix/getMIXEnergyTotalChart";
pub const MIX_BAT_CHART: &Endpoint = "/panel/mix/getMIXBatChart";
