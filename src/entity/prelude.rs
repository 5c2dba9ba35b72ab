//! 预导入模块，方便使用

pub use super::content_elements::{
    ActiveModel as ContentElementActiveModel, Entity as ContentElements,
    Model as ContentElementModel,
};
pub use super::content_pages::{
    ActiveModel as ContentPageActiveModel, Entity as ContentPages, Model as ContentPageModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::departments::{
    ActiveModel as DepartmentActiveModel, Entity as Departments, Model as DepartmentModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::media_items::{
    ActiveModel as MediaItemActiveModel, Entity as MediaItems, Model as MediaItemModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
