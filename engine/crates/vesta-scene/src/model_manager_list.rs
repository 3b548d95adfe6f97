use crate::model_manager::ModelManager;
use std::cell::RefCell;
use std::rc::Rc;

/// 按加入顺序绘制的 [`ModelManager`] 列表
///
/// 列表只持有共享引用，同一个 manager 可以同时被其他地方修改（例如 reload）
#[derive(Default)]
pub struct ModelManagerList {
    managers: Vec<Rc<RefCell<ModelManager>>>,
}
// new & init
impl ModelManagerList {
    pub fn new() -> Self {
        Self::default()
    }
}
// getter
impl ModelManagerList {
    #[inline]
    pub fn count(&self) -> usize {
        self.managers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// 越界时返回 `None`
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rc<RefCell<ModelManager>>> {
        self.managers.get(index).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<RefCell<ModelManager>>> {
        self.managers.iter()
    }
}
// tools
impl ModelManagerList {
    pub fn add(&mut self, manager: Rc<RefCell<ModelManager>>) {
        self.managers.push(manager);
    }

    /// 依次绘制所有 manager，未绑定的会被跳过
    pub fn draw_all(&self) {
        for manager in &self.managers {
            manager.borrow().draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_manager::BindingState;
    use std::sync::Arc;
    use vesta_gfx::context::SharedGfxContext;
    use vesta_gfx::headless::HeadlessGfxContext;
    use vesta_model::shapes::cube::BoxShape;
    use vesta_model::shapes::quad::QuadShape;

    #[test]
    fn test_draw_all_in_order() {
        let headless = Rc::new(RefCell::new(HeadlessGfxContext::new()));
        let ctx: SharedGfxContext = headless.clone();

        let cube = ModelManager::with_model(ctx.clone(), Arc::new(BoxShape::default_model().unwrap())).unwrap();
        let quad = ModelManager::with_model(ctx.clone(), Arc::new(QuadShape::default_model().unwrap())).unwrap();
        let unbound = ModelManager::new(ctx);

        let mut list = ModelManagerList::new();
        list.add(Rc::new(RefCell::new(cube)));
        list.add(Rc::new(RefCell::new(unbound)));
        list.add(Rc::new(RefCell::new(quad)));

        assert_eq!(list.count(), 3);
        assert_eq!(list.get(1).unwrap().borrow().state(), BindingState::Unbound);
        assert!(list.get(3).is_none());

        list.draw_all();

        let index_cnts: Vec<u32> = headless.borrow().draw_calls().iter().map(|draw| draw.index_cnt).collect();
        assert_eq!(index_cnts, vec![36, 6]);
    }

    #[test]
    fn test_shared_manager_reload() {
        let headless = Rc::new(RefCell::new(HeadlessGfxContext::new()));
        let ctx: SharedGfxContext = headless.clone();

        let manager = Rc::new(RefCell::new(
            ModelManager::with_model(ctx, Arc::new(BoxShape::default_model().unwrap())).unwrap(),
        ));
        let mut list = ModelManagerList::new();
        list.add(manager.clone());

        manager
            .borrow_mut()
            .reload_model(Arc::new(QuadShape::default_model().unwrap()))
            .unwrap();
        list.draw_all();

        assert_eq!(headless.borrow().draw_calls()[0].index_cnt, 6);
        assert_eq!(list.iter().count(), 1);
    }
}
